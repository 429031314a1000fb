//! Blocking temperature probe with bounded conversion retry
//!
//! The ambient sensor hangs off a single ADC channel read as an 8-bit
//! left-justified sample (the top byte of a 10-bit conversion against
//! the 1.1 V reference). A conversion is started and its completion
//! flag spin-polled; the spin is bounded, and a conversion that never
//! completes surfaces as `SenseError::ConversionTimeout` instead of
//! hanging the poll loop.

use thyra_core::traits::{SenseError, TemperatureProbe};

/// ADC conversion interface for the temperature channel
///
/// Split into start/poll so the bounded completion spin lives in the
/// sensor rather than in each platform binding.
pub trait AdcReader {
    /// Begin one conversion
    fn start(&mut self);

    /// Poll the conversion-complete flag, returning the 8-bit
    /// left-justified sample once available
    fn poll(&mut self) -> Option<u8>;
}

/// Probe configuration
#[derive(Debug, Clone)]
pub struct SensorConfig {
    /// Completion-flag polls per conversion before giving up
    ///
    /// A conversion takes tens of microseconds at the /128 ADC clock;
    /// the default bound is orders of magnitude above that.
    pub max_poll_spins: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            max_poll_spins: 10_000,
        }
    }
}

/// Temperature probe over an [`AdcReader`]
pub struct BandSensor<A> {
    adc: A,
    config: SensorConfig,
}

impl<A: AdcReader> BandSensor<A> {
    pub fn new(adc: A, config: SensorConfig) -> Self {
        Self { adc, config }
    }

    pub fn config(&self) -> &SensorConfig {
        &self.config
    }
}

impl<A: AdcReader> TemperatureProbe for BandSensor<A> {
    fn sample_raw(&mut self) -> Result<u8, SenseError> {
        self.adc.start();

        for _ in 0..self.config.max_poll_spins {
            if let Some(raw) = self.adc.poll() {
                return Ok(raw);
            }
        }

        Err(SenseError::ConversionTimeout)
    }
}

/// Dummy ADC for testing (fixed value, configurable readiness)
#[cfg(test)]
pub struct DummyAdc {
    pub value: u8,
    /// Polls before the conversion reads as complete; `None` never
    /// completes
    pub ready_after: Option<u32>,
    pub conversions_started: u32,
    polls: u32,
}

#[cfg(test)]
impl DummyAdc {
    pub fn new(value: u8, ready_after: Option<u32>) -> Self {
        Self {
            value,
            ready_after,
            conversions_started: 0,
            polls: 0,
        }
    }
}

#[cfg(test)]
impl AdcReader for DummyAdc {
    fn start(&mut self) {
        self.conversions_started += 1;
        self.polls = 0;
    }

    fn poll(&mut self) -> Option<u8> {
        self.polls += 1;
        match self.ready_after {
            Some(n) if self.polls > n => Some(self.value),
            _ => None,
        }
    }
}
