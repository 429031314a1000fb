//! Access-control polling task
//!
//! Owns the whole actuation stack (triggers, temperature probe, door
//! actuator) and runs the policy gate continuously. A door cycle is a
//! long blocking stretch by design; the cycle gate stays masked for
//! its whole duration, so the lock-override task defers until the
//! handle is back at rest.

use defmt::*;
use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::gpio::{Input, Output};
use embassy_time::{Delay, Timer};

use thyra_core::policy::{AccessController, PollOutcome};
use thyra_core::traits::TriggerInputs;
use thyra_drivers::delay::HalDelay;
use thyra_drivers::motor::LatchMotor;
use thyra_drivers::sensor::{AdcReader, BandSensor};
use thyra_drivers::stepper::FourWireStepper;

use crate::shared::{SharedDuty, CYCLE_GATE};

/// Idle time between poll iterations (ms)
const POLL_INTERVAL_MS: u64 = 5;

/// The two proximity-trigger request lines
pub struct DoorTriggers {
    outside: Input<'static>,
    inside: Input<'static>,
}

impl DoorTriggers {
    pub fn new(outside: Input<'static>, inside: Input<'static>) -> Self {
        Self { outside, inside }
    }
}

impl TriggerInputs for DoorTriggers {
    fn outside_asserted(&mut self) -> bool {
        self.outside.is_high()
    }

    fn inside_asserted(&mut self) -> bool {
        self.inside.is_high()
    }
}

/// Temperature channel over the blocking on-chip ADC
///
/// RP2040 conversions are 12-bit; the top byte is the left-justified
/// 8-bit sample the policy band is calibrated for.
pub struct BlockingAdc {
    adc: Adc<'static, Blocking>,
    channel: Channel<'static>,
    sample: Option<u8>,
}

impl BlockingAdc {
    pub fn new(adc: Adc<'static, Blocking>, channel: Channel<'static>) -> Self {
        Self {
            adc,
            channel,
            sample: None,
        }
    }
}

impl AdcReader for BlockingAdc {
    fn start(&mut self) {
        // The blocking read spans the whole conversion; a failed read
        // leaves no sample and the sensor's bounded spin times out
        self.sample = self
            .adc
            .blocking_read(&mut self.channel)
            .ok()
            .map(|raw| (raw >> 4) as u8);
    }

    fn poll(&mut self) -> Option<u8> {
        self.sample.take()
    }
}

/// The fully wired access controller
pub type Controller = AccessController<
    DoorTriggers,
    BandSensor<BlockingAdc>,
    FourWireStepper<Output<'static>>,
    LatchMotor<Output<'static>, Output<'static>, SharedDuty>,
    HalDelay<Delay>,
>;

/// Continuous access-control poll loop
#[embassy_executor::task]
pub async fn control_task(mut controller: Controller) {
    info!("Access control task started");

    loop {
        match controller.poll_once(&CYCLE_GATE) {
            PollOutcome::Opened(source) => {
                info!("Door cycle complete (trigger: {:?})", source);
            }
            PollOutcome::SensorFault(e) => {
                warn!("Temperature conversion failed: {:?}", e);
            }
            PollOutcome::Idle => {}
        }

        Timer::after_millis(POLL_INTERVAL_MS).await;
    }
}
