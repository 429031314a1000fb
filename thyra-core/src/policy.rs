//! Temperature-gated access policy
//!
//! Each poll iteration samples the ambient temperature (a fresh
//! blocking conversion - never cached), reads both trigger lines, and
//! decides whether to run a door cycle. Outside access always wins and
//! bypasses the temperature gate; inside access is granted only while
//! the reading sits inside the safe band.

use crate::cycle::{CycleGate, DoorActuator};
use crate::timing::QuantumDelay;
use crate::traits::{LatchDrive, SenseError, TemperatureProbe, TriggerInputs, WindingBus};

/// Lower edge of the safe band, inclusive
///
/// Raw 8-bit left-justified sample: 93 ≙ 0.40 V at the 1.1 V reference
/// ≙ about −10 °C at the sensor.
pub const SAFE_RAW_MIN: u8 = 93;

/// Upper edge of the safe band, inclusive
///
/// 197 ≙ 0.85 V ≙ about 35 °C. 133 is roughly room temperature.
pub const SAFE_RAW_MAX: u8 = 197;

/// Classification of one raw temperature sample
///
/// Derived fresh from every conversion; an out-of-band reading is a
/// normal policy input, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureSafety {
    Safe,
    Unsafe,
}

impl TemperatureSafety {
    /// Classify a raw 8-bit left-justified sample
    pub fn from_raw(raw: u8) -> Self {
        if (SAFE_RAW_MIN..=SAFE_RAW_MAX).contains(&raw) {
            TemperatureSafety::Safe
        } else {
            TemperatureSafety::Unsafe
        }
    }

    pub fn is_safe(self) -> bool {
        self == TemperatureSafety::Safe
    }
}

/// Which trigger line earned the grant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccessSource {
    Outside,
    Inside,
}

/// Access decision, evaluated in strict priority order
///
/// Outside access is granted unconditionally; inside access only while
/// the temperature is safe. No debouncing or rate limiting: a trigger
/// held high re-opens the door once per poll iteration that observes it.
pub fn decide(outside: bool, inside: bool, temp: TemperatureSafety) -> Option<AccessSource> {
    if outside {
        Some(AccessSource::Outside)
    } else if inside && temp.is_safe() {
        Some(AccessSource::Inside)
    } else {
        None
    }
}

/// Outcome of one poll iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollOutcome {
    /// A door cycle ran on behalf of this trigger
    Opened(AccessSource),
    /// No trigger asserted (or inside access denied by temperature)
    Idle,
    /// The conversion failed and no grant was possible; inside access
    /// is denied on a failed conversion, outside access never consults
    /// the sensor
    SensorFault(SenseError),
}

/// Continuous access gate
///
/// Composes the trigger inputs, the temperature probe, and the door
/// actuator; the firmware calls [`AccessController::poll_once`] in a
/// tight loop.
pub struct AccessController<T, P, W, L, D> {
    triggers: T,
    probe: P,
    actuator: DoorActuator<W, L, D>,
}

impl<T, P, W, L, D> AccessController<T, P, W, L, D>
where
    T: TriggerInputs,
    P: TemperatureProbe,
    W: WindingBus,
    L: LatchDrive,
    D: QuantumDelay,
{
    pub fn new(triggers: T, probe: P, actuator: DoorActuator<W, L, D>) -> Self {
        Self {
            triggers,
            probe,
            actuator,
        }
    }

    /// The wrapped door actuator
    pub fn actuator(&self) -> &DoorActuator<W, L, D> {
        &self.actuator
    }

    /// Run one poll iteration: sample, decide, actuate
    pub fn poll_once(&mut self, gate: &CycleGate) -> PollOutcome {
        let mut fault = None;
        let safety = match self.probe.sample_raw() {
            Ok(raw) => TemperatureSafety::from_raw(raw),
            Err(e) => {
                fault = Some(e);
                TemperatureSafety::Unsafe
            }
        };

        let outside = self.triggers.outside_asserted();
        let inside = self.triggers.inside_asserted();

        match decide(outside, inside, safety) {
            Some(source) => {
                self.actuator.cycle_door(gate);
                PollOutcome::Opened(source)
            }
            None => match fault {
                Some(e) => PollOutcome::SensorFault(e),
                None => PollOutcome::Idle,
            },
        }
    }
}
