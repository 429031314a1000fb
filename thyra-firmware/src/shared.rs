//! Inter-task shared state
//!
//! The cycle gate and the latch PWM slice are the only resources
//! touched by both tasks. The gate's mask discipline keeps each of
//! them single-writer at any point in time: the control task drives
//! the PWM only while a cycle holds the mask, the lock-override task
//! only while it does not.

use core::cell::RefCell;
use core::convert::Infallible;

use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::pwm::SetDutyCycle;

use thyra_core::cycle::CycleGate;
use thyra_core::traits::PwmTimer;

/// PWM slice divider for the latch motor (with [`PWM_TOP`]:
/// 125 MHz / (255 × 490) ≈ 1.0 kHz)
pub const PWM_DIVIDER: u8 = 255;

/// PWM wrap value for the latch motor slice
pub const PWM_TOP: u16 = 489;

/// Mask shared between the door cycle orchestrator and the
/// lock-override handler
pub static CYCLE_GATE: CycleGate = CycleGate::new();

/// Latch PWM slice plus the configuration it was brought up with
///
/// The configuration is kept so the lock-override handler can restart
/// the timer with its original prescale after stopping it.
pub struct LatchPwm {
    pub pwm: Pwm<'static>,
    pub config: PwmConfig,
}

/// The latch PWM slice, installed once by `main` before tasks spawn
pub static LATCH_PWM: Mutex<CriticalSectionRawMutex, RefCell<Option<LatchPwm>>> =
    Mutex::new(RefCell::new(None));

/// Duty-register view of the shared PWM slice for the latch motor
/// driver
pub struct SharedDuty;

impl embedded_hal::pwm::ErrorType for SharedDuty {
    type Error = Infallible;
}

impl SetDutyCycle for SharedDuty {
    fn max_duty_cycle(&self) -> u16 {
        PWM_TOP + 1
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        LATCH_PWM.lock(|cell| {
            if let Some(latch) = cell.borrow_mut().as_mut() {
                latch.config.compare_a = duty;
                latch.pwm.set_config(&latch.config);
            }
        });
        Ok(())
    }
}

/// Timer-control view of the shared PWM slice for the lock-override
/// handler
pub struct SharedSlice;

impl PwmTimer for SharedSlice {
    fn stop(&mut self) {
        LATCH_PWM.lock(|cell| {
            if let Some(latch) = cell.borrow_mut().as_mut() {
                latch.config.enable = false;
                latch.pwm.set_config(&latch.config);
            }
        });
    }

    fn restart(&mut self) {
        LATCH_PWM.lock(|cell| {
            if let Some(latch) = cell.borrow_mut().as_mut() {
                latch.config.enable = true;
                latch.pwm.set_config(&latch.config);
            }
        });
    }
}
