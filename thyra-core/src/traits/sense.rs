//! Input sensing traits
//!
//! Trigger lines and the lock-override line are level-sensitive digital
//! inputs; temperature comes from a blocking analog conversion.

/// State of the mechanical lock-override line
///
/// The line is active-low at the pin; implementations invert so that
/// `Asserted` always means "mechanically locked".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockSignalState {
    Asserted,
    Deasserted,
}

/// Errors that can occur on the sensing path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SenseError {
    /// The analog conversion did not complete within the bounded number
    /// of completion-flag polls
    ConversionTimeout,
}

/// The two proximity-trigger request lines (level-high = request)
pub trait TriggerInputs {
    fn outside_asserted(&mut self) -> bool;
    fn inside_asserted(&mut self) -> bool;
}

/// The lock-override line, sampled at handler entry and busy-polled
/// inside the handler
pub trait LockSense {
    fn sample(&mut self) -> LockSignalState;
}

/// Ambient temperature probe
///
/// One call is one blocking conversion; the result is the raw 8-bit
/// left-justified sample. Callers classify it per poll and never cache
/// it across polls.
pub trait TemperatureProbe {
    fn sample_raw(&mut self) -> Result<u8, SenseError>;
}
