//! Stepper phase sequencer for the handle motor
//!
//! Full-step wave commutation over two H-bridge winding pairs: each of
//! the four phases energizes exactly one half-winding, and one call to
//! [`Sequencer::step_cw`] / [`Sequencer::step_ccw`] advances the phase
//! by exactly one position and yields the pattern to latch onto the
//! outputs. Direction may reverse between any two calls; the sequencer
//! always resumes from its current phase.

/// Handle rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepDirection {
    /// Clockwise rotation (handle opening)
    Clockwise,
    /// Counter-clockwise rotation (handle returning)
    CounterClockwise,
}

impl StepDirection {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            StepDirection::Clockwise => StepDirection::CounterClockwise,
            StepDirection::CounterClockwise => StepDirection::Clockwise,
        }
    }
}

/// One of the four commutation phases
///
/// The only persistent state of the sequencer. Transitions happen only
/// through [`Sequencer::step_cw`] / [`Sequencer::step_ccw`] and wrap
/// cyclically (CW: 1→4→3→2→1, CCW: 1→2→3→4→1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepperPhase {
    P1,
    P2,
    P3,
    P4,
}

impl StepperPhase {
    /// Phase number (1-4)
    pub const fn number(self) -> u8 {
        match self {
            StepperPhase::P1 => 1,
            StepperPhase::P2 => 2,
            StepperPhase::P3 => 3,
            StepperPhase::P4 => 4,
        }
    }

    /// The phase one step away in the given direction
    const fn next(self, direction: StepDirection) -> Self {
        use StepDirection::*;
        use StepperPhase::*;

        match (self, direction) {
            (P1, Clockwise) => P4,
            (P4, Clockwise) => P3,
            (P3, Clockwise) => P2,
            (P2, Clockwise) => P1,
            (P1, CounterClockwise) => P2,
            (P2, CounterClockwise) => P3,
            (P3, CounterClockwise) => P4,
            (P4, CounterClockwise) => P1,
        }
    }

    /// Winding energization for this phase
    ///
    /// Wave drive: exactly one half-winding carries current per phase.
    /// CW phase order energizes A+, B+, A−, B−.
    pub const fn pattern(self) -> WindingPattern {
        use WindingDrive::*;

        match self {
            StepperPhase::P1 => WindingPattern { a: Forward, b: Off },
            StepperPhase::P2 => WindingPattern { a: Off, b: Reverse },
            StepperPhase::P3 => WindingPattern { a: Reverse, b: Off },
            StepperPhase::P4 => WindingPattern { a: Off, b: Forward },
        }
    }
}

/// Drive state of one winding pair (two-bit energization)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WindingDrive {
    /// Neither end energized
    Off,
    /// Positive end energized
    Forward,
    /// Negative end energized
    Reverse,
}

/// Energization pattern for both winding pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindingPattern {
    /// Winding pair A
    pub a: WindingDrive,
    /// Winding pair B
    pub b: WindingDrive,
}

impl WindingPattern {
    /// Fully de-energized pattern (holding torque released)
    pub const RELEASED: WindingPattern = WindingPattern {
        a: WindingDrive::Off,
        b: WindingDrive::Off,
    };
}

/// Four-phase commutation state machine
///
/// Owns the current [`StepperPhase`]; no other component reads or
/// writes it.
#[derive(Debug, Clone)]
pub struct Sequencer {
    phase: StepperPhase,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequencer {
    /// Create a sequencer resting at phase 1
    pub const fn new() -> Self {
        Self {
            phase: StepperPhase::P1,
        }
    }

    /// Current commutation phase
    pub fn phase(&self) -> StepperPhase {
        self.phase
    }

    /// Advance one step in the given direction and return the pattern
    /// to emit
    pub fn step(&mut self, direction: StepDirection) -> WindingPattern {
        self.phase = self.phase.next(direction);
        self.phase.pattern()
    }

    /// Advance one step clockwise
    pub fn step_cw(&mut self) -> WindingPattern {
        self.step(StepDirection::Clockwise)
    }

    /// Advance one step counter-clockwise
    pub fn step_ccw(&mut self) -> WindingPattern {
        self.step(StepDirection::CounterClockwise)
    }
}
