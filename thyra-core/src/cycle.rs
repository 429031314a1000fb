//! Atomic door open/close cycle orchestrator
//!
//! One invocation of [`DoorActuator::cycle_door`] runs the full fixed
//! sequence: rotate the handle open, pulse the release motor, dwell
//! with the door open, pulse the relatch motor, rotate the handle back.
//! The whole sequence holds the [`CycleGate`] mask so the lock-override
//! handler can never observe a half-open mechanical state; an override
//! arriving mid-cycle is deferred, not dropped.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::sequencer::Sequencer;
use crate::timing::{ClockQuantum, QuantumDelay};
use crate::traits::{LatchDrive, MotorDirection, WindingBus};

/// Handle rotation steps per cycle
///
/// 350 full steps of a 200-step (1.8°) motor - not quite two full
/// turns, which is what the handle linkage needs to clear the strike.
pub const HANDLE_STEPS: u16 = 350;

/// Per-step dwell, in quantum units (25 × 1 ms = 25 ms per step)
pub const STEP_WAIT_UNITS: u16 = 25;

/// Quantum used for every dwell in the cycle (1 ms units)
pub const CYCLE_QUANTUM: ClockQuantum = ClockQuantum::Div64;

/// Release/relatch pulse length (≈2 s at the 1 ms quantum)
pub const LATCH_PULSE_UNITS: u16 = 2000;

/// Door-open hold (≈8 s at the 1 ms quantum)
pub const OPEN_HOLD_UNITS: u16 = 8000;

/// Release pulse duty, ≈10% of the 8-bit range (gravity assists the
/// release direction)
pub const RELEASE_DUTY: u8 = 0x1A;

/// Relatch pulse duty, ≈25% of the 8-bit range (works against the
/// return spring)
pub const RELATCH_DUTY: u8 = 0x40;

/// Door cycle timing and drive parameters
///
/// All values are compiled-in; the struct exists so tests can shrink
/// step counts and dwells.
#[derive(Debug, Clone)]
pub struct CycleConfig {
    /// Handle rotation steps each way
    pub handle_steps: u16,
    /// Per-step dwell in quantum units
    pub step_wait_units: u16,
    /// Release/relatch pulse length in quantum units
    pub latch_pulse_units: u16,
    /// Door-open hold in quantum units
    pub open_hold_units: u16,
    /// PWM duty for the release pulse
    pub release_duty: u8,
    /// PWM duty for the relatch pulse
    pub relatch_duty: u8,
    /// Quantum for every dwell in the cycle
    pub quantum: ClockQuantum,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            handle_steps: HANDLE_STEPS,
            step_wait_units: STEP_WAIT_UNITS,
            latch_pulse_units: LATCH_PULSE_UNITS,
            open_hold_units: OPEN_HOLD_UNITS,
            release_duty: RELEASE_DUTY,
            relatch_duty: RELATCH_DUTY,
            quantum: CYCLE_QUANTUM,
        }
    }
}

/// Shared mask between the cycle orchestrator and the lock-override
/// handler
///
/// While masked, the override handler defers; the request line is
/// level-triggered, so a deferred assertion is handled as soon as the
/// mask drops. Plain load/store atomics - there is exactly one masker
/// (the orchestrator) by construction.
#[derive(Debug)]
pub struct CycleGate {
    masked: AtomicBool,
}

impl Default for CycleGate {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleGate {
    pub const fn new() -> Self {
        Self {
            masked: AtomicBool::new(false),
        }
    }

    /// Whether a door cycle is currently holding the mask
    pub fn is_masked(&self) -> bool {
        self.masked.load(Ordering::Acquire)
    }

    /// Hold the mask for the lifetime of the returned guard
    pub fn mask(&self) -> MaskGuard<'_> {
        self.masked.store(true, Ordering::Release);
        MaskGuard { gate: self }
    }
}

/// RAII mask hold; dropping unmasks
pub struct MaskGuard<'a> {
    gate: &'a CycleGate,
}

impl Drop for MaskGuard<'_> {
    fn drop(&mut self) {
        self.gate.masked.store(false, Ordering::Release);
    }
}

/// Result of a door cycle
///
/// No failure path is modeled: once started, a cycle always runs to
/// completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    Completed,
}

/// Door actuation engine
///
/// Owns the phase sequencer and drives the winding bus, the latch
/// motor, and the quantum delay through the fixed open/close sequence.
pub struct DoorActuator<W, L, D> {
    sequencer: Sequencer,
    windings: W,
    latch: L,
    delay: D,
    config: CycleConfig,
}

impl<W: WindingBus, L: LatchDrive, D: QuantumDelay> DoorActuator<W, L, D> {
    /// Create an actuator with the sequencer resting at phase 1
    pub fn new(windings: W, latch: L, delay: D, config: CycleConfig) -> Self {
        Self {
            sequencer: Sequencer::new(),
            windings,
            latch,
            delay,
            config,
        }
    }

    /// Current sequencer state
    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// Cycle parameters
    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    /// Run one full open/close cycle
    ///
    /// Masks `gate` for the entire sequence and unmasks it on return.
    /// Postcondition regardless of entry state: the duty register is
    /// 0x00 and both direction selects are de-energized.
    pub fn cycle_door(&mut self, gate: &CycleGate) -> CycleOutcome {
        let _mask = gate.mask();

        // Turn the handle open
        for _ in 0..self.config.handle_steps {
            let pattern = self.sequencer.step_cw();
            self.windings.energize(pattern);
            self.delay.wait(self.config.step_wait_units, self.config.quantum);
        }

        // Release pulse
        self.pulse_latch(MotorDirection::Forward, self.config.release_duty);

        // Door is now open
        self.delay.wait(self.config.open_hold_units, self.config.quantum);

        // Relatch pulse
        self.pulse_latch(MotorDirection::Reverse, self.config.relatch_duty);

        // Return the handle to its resting position
        for _ in 0..self.config.handle_steps {
            let pattern = self.sequencer.step_ccw();
            self.windings.energize(pattern);
            self.delay.wait(self.config.step_wait_units, self.config.quantum);
        }

        CycleOutcome::Completed
    }

    /// Drive the latch motor in one direction for the fixed pulse
    /// length, then cut duty and de-energize both selects
    fn pulse_latch(&mut self, direction: MotorDirection, duty: u8) {
        self.latch.set_direction(direction);
        self.latch.set_duty(duty);
        self.delay.wait(self.config.latch_pulse_units, self.config.quantum);
        self.latch.set_duty(0x00);
        self.latch.set_direction(MotorDirection::Off);
    }
}
