//! Thyra - Access-Controlled Door Firmware
//!
//! Main firmware binary for RP2040-based door controllers.
//!
//! Named after the Greek "thyra" (θύρα) meaning "door" - the firmware
//! decides when the door may open and drives the handle stepper and
//! latch motor through the motions.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use thyra_core::cycle::{CycleConfig, DoorActuator};
use thyra_core::policy::AccessController;
use thyra_drivers::delay::HalDelay;
use thyra_drivers::motor::LatchMotor;
use thyra_drivers::sensor::{BandSensor, SensorConfig};
use thyra_drivers::stepper::FourWireStepper;

use crate::shared::{LatchPwm, SharedDuty, LATCH_PWM, PWM_DIVIDER, PWM_TOP};
use crate::tasks::control::{BlockingAdc, DoorTriggers};

mod shared;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Thyra firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Handle stepper winding outputs (A+, A-, B+, B-)
    let windings = FourWireStepper::new(
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        Output::new(p.PIN_4, Level::Low),
        Output::new(p.PIN_5, Level::Low),
    );

    // Latch motor PWM at ~1 kHz, duty 0 until a cycle drives it
    let mut pwm_config = PwmConfig::default();
    pwm_config.divider = PWM_DIVIDER.into();
    pwm_config.top = PWM_TOP;
    pwm_config.compare_a = 0;
    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, pwm_config.clone());
    LATCH_PWM.lock(|cell| {
        cell.borrow_mut().replace(LatchPwm {
            pwm,
            config: pwm_config,
        });
    });

    // Latch motor direction selects
    let latch = LatchMotor::new(
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
        SharedDuty,
    );

    info!("Actuator outputs initialized");

    // Temperature sensing via the blocking on-chip ADC
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let therm_channel = Channel::new_pin(p.PIN_26, Pull::None);
    let probe = BandSensor::new(BlockingAdc::new(adc, therm_channel), SensorConfig::default());

    // Proximity-trigger request lines (level-high = request)
    let triggers = DoorTriggers::new(
        Input::new(p.PIN_10, Pull::Down),
        Input::new(p.PIN_11, Pull::Down),
    );

    info!("Sensing inputs initialized");

    let actuator = DoorActuator::new(
        windings,
        latch,
        HalDelay::new(Delay),
        CycleConfig::default(),
    );
    let controller = AccessController::new(triggers, probe, actuator);

    // Mechanical lock line (active-low, pulled up) and the indicator,
    // which starts in the unlocked state
    let lock_line = Input::new(p.PIN_12, Pull::Up);
    let indicator = Output::new(p.PIN_8, Level::High);

    // Spawn tasks
    spawner.spawn(tasks::control_task(controller)).unwrap();
    spawner.spawn(tasks::lockout_task(lock_line, indicator)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
