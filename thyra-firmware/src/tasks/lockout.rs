//! Lock-override task
//!
//! Watches the active-low mechanical lock line. On assertion it stops
//! the latch PWM slice and pulls the lock indicator low, then polls
//! the line until the mechanical unlock acknowledgment; there is no
//! timeout. If a door cycle holds the gate mask the assertion is
//! deferred - the line is level-triggered, so nothing is lost.

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_time::Timer;

use thyra_core::lockout::{Lockout, LockoutAction};
use thyra_core::traits::{LockIndicator, LockSense, LockSignalState, PwmTimer};

use crate::shared::{SharedSlice, CYCLE_GATE};

/// Line poll interval while locked or deferred (ms)
const LOCK_POLL_INTERVAL_MS: u64 = 1;

/// The mechanical lock line (active-low: low level = locked)
struct LockLine(Input<'static>);

impl LockLine {
    async fn wait_asserted(&mut self) {
        self.0.wait_for_low().await;
    }
}

impl LockSense for LockLine {
    fn sample(&mut self) -> LockSignalState {
        if self.0.is_low() {
            LockSignalState::Asserted
        } else {
            LockSignalState::Deasserted
        }
    }
}

/// Lock indicator output (high = unlocked)
struct IndicatorPin(Output<'static>);

impl LockIndicator for IndicatorPin {
    fn set_unlocked(&mut self, unlocked: bool) {
        if unlocked {
            self.0.set_high();
        } else {
            self.0.set_low();
        }
    }
}

/// Lock-override handling loop
#[embassy_executor::task]
pub async fn lockout_task(line: Input<'static>, indicator: Output<'static>) {
    info!("Lock-override task started");

    let mut line = LockLine(line);
    let mut indicator = IndicatorPin(indicator);
    let mut lockout = Lockout::new();
    let mut slice = SharedSlice;

    loop {
        line.wait_asserted().await;

        let mut threshold_logged = false;

        loop {
            match lockout.poll(line.sample(), &CYCLE_GATE) {
                LockoutAction::Engage => {
                    slice.stop();
                    indicator.set_unlocked(false);
                    info!("Mechanical lock engaged, PWM stopped");
                }
                LockoutAction::Hold => {
                    if lockout.wait_exceeded() && !threshold_logged {
                        threshold_logged = true;
                        warn!(
                            "Lock-override held past diagnostic threshold ({} polls)",
                            lockout.wait_polls()
                        );
                    }
                }
                LockoutAction::Deferred => {
                    // Door cycle in progress; re-poll once it completes
                }
                LockoutAction::Release => {
                    indicator.set_unlocked(true);
                    slice.restart();
                    info!(
                        "Mechanical lock released after {} polls",
                        lockout.last_wait_polls().unwrap_or(0)
                    );
                    break;
                }
                LockoutAction::Idle => break,
            }

            Timer::after_millis(LOCK_POLL_INTERVAL_MS).await;
        }
    }
}
