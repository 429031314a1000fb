//! Actuator output traits
//!
//! Infallible setters modeling one-way writes to the output stage:
//! stepper winding pairs, H-bridge direction selects, the PWM duty
//! register, and the lock indicator line.

use crate::sequencer::WindingPattern;

/// H-bridge drive direction for the latch/release motor
///
/// Derived fresh each time the latch stage is driven; never persisted.
/// `Off` de-energizes both direction selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorDirection {
    /// Release direction (door opening)
    Forward,
    /// Relatch direction (door closing)
    Reverse,
    /// Both selects de-energized, motor coasts
    Off,
}

/// Output stage for the handle stepper's two winding pairs
///
/// Implementations latch the given energization pattern onto the
/// winding outputs and hold it until the next call.
pub trait WindingBus {
    fn energize(&mut self, pattern: WindingPattern);
}

/// Output stage for the latch/release motor
///
/// The two direction selects are mutually exclusive; implementations
/// must never drive forward and reverse simultaneously.
pub trait LatchDrive {
    /// Select the drive direction (or de-energize both selects)
    fn set_direction(&mut self, direction: MotorDirection);

    /// Write the 8-bit PWM duty register (0x00 = off, 0xFF = full drive)
    fn set_duty(&mut self, duty: u8);
}

/// Lock indicator/solenoid output (high = unlocked)
pub trait LockIndicator {
    fn set_unlocked(&mut self, unlocked: bool);
}

/// Control over the PWM timer backing the duty register
///
/// The lock-override handler stops the timer so the latch motor cannot
/// continue mid-pulse, and restarts it with its original prescale
/// configuration on release.
pub trait PwmTimer {
    fn stop(&mut self);
    fn restart(&mut self);
}
