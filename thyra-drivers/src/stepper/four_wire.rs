//! Four-wire winding bus for the handle stepper
//!
//! Drives the two H-bridge winding pairs directly from four GPIO
//! outputs (A+, A−, B+, B−). The phase sequencing itself lives in
//! thyra-core; this driver only latches the energization pattern onto
//! the pins.

use embedded_hal::digital::{OutputPin, PinState};

use thyra_core::sequencer::{WindingDrive, WindingPattern};
use thyra_core::traits::WindingBus;

/// GPIO-backed winding bus
///
/// Pin errors are discarded: the actuation path models one-way register
/// writes and the pins on supported boards are infallible.
pub struct FourWireStepper<P> {
    a_plus: P,
    a_minus: P,
    b_plus: P,
    b_minus: P,
}

impl<P: OutputPin> FourWireStepper<P> {
    /// Take ownership of the four winding outputs, starting fully
    /// de-energized
    pub fn new(a_plus: P, a_minus: P, b_plus: P, b_minus: P) -> Self {
        let mut bus = Self {
            a_plus,
            a_minus,
            b_plus,
            b_minus,
        };
        bus.energize(WindingPattern::RELEASED);
        bus
    }

    /// Drop holding torque by de-energizing both pairs
    pub fn release(&mut self) {
        self.energize(WindingPattern::RELEASED);
    }

    fn pair_levels(drive: WindingDrive) -> (PinState, PinState) {
        match drive {
            WindingDrive::Forward => (PinState::High, PinState::Low),
            WindingDrive::Reverse => (PinState::Low, PinState::High),
            WindingDrive::Off => (PinState::Low, PinState::Low),
        }
    }
}

impl<P: OutputPin> WindingBus for FourWireStepper<P> {
    fn energize(&mut self, pattern: WindingPattern) {
        let (a_plus, a_minus) = Self::pair_levels(pattern.a);
        let (b_plus, b_minus) = Self::pair_levels(pattern.b);

        let _ = self.a_plus.set_state(a_plus);
        let _ = self.a_minus.set_state(a_minus);
        let _ = self.b_plus.set_state(b_plus);
        let _ = self.b_minus.set_state(b_minus);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use thyra_core::sequencer::StepperPhase;

    struct MockPin<'a> {
        level: &'a Cell<bool>,
    }

    impl embedded_hal::digital::ErrorType for MockPin<'_> {
        type Error = Infallible;
    }

    impl OutputPin for MockPin<'_> {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.level.set(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.level.set(true);
            Ok(())
        }
    }

    fn bus<'a>(
        levels: &'a [Cell<bool>; 4],
    ) -> FourWireStepper<MockPin<'a>> {
        FourWireStepper::new(
            MockPin { level: &levels[0] },
            MockPin { level: &levels[1] },
            MockPin { level: &levels[2] },
            MockPin { level: &levels[3] },
        )
    }

    fn snapshot(levels: &[Cell<bool>; 4]) -> [bool; 4] {
        [
            levels[0].get(),
            levels[1].get(),
            levels[2].get(),
            levels[3].get(),
        ]
    }

    #[test]
    fn test_starts_released() {
        let levels = [Cell::new(true), Cell::new(true), Cell::new(true), Cell::new(true)];
        let _bus = bus(&levels);
        assert_eq!(snapshot(&levels), [false; 4]);
    }

    #[test]
    fn test_phase_pin_map() {
        let levels = [Cell::new(false), Cell::new(false), Cell::new(false), Cell::new(false)];
        let mut bus = bus(&levels);

        // (A+, A-, B+, B-) per phase: wave drive, one pin high at a time
        let expected = [
            (StepperPhase::P1, [true, false, false, false]),
            (StepperPhase::P2, [false, false, false, true]),
            (StepperPhase::P3, [false, true, false, false]),
            (StepperPhase::P4, [false, false, true, false]),
        ];

        for (phase, pins) in expected {
            bus.energize(phase.pattern());
            assert_eq!(snapshot(&levels), pins, "{:?}", phase);
        }
    }

    #[test]
    fn test_at_most_one_pin_high() {
        let levels = [Cell::new(false), Cell::new(false), Cell::new(false), Cell::new(false)];
        let mut bus = bus(&levels);

        for phase in [
            StepperPhase::P1,
            StepperPhase::P2,
            StepperPhase::P3,
            StepperPhase::P4,
        ] {
            bus.energize(phase.pattern());
            let high = snapshot(&levels).iter().filter(|h| **h).count();
            assert_eq!(high, 1);
        }
    }

    #[test]
    fn test_release_clears_all() {
        let levels = [Cell::new(false), Cell::new(false), Cell::new(false), Cell::new(false)];
        let mut bus = bus(&levels);

        bus.energize(StepperPhase::P3.pattern());
        bus.release();
        assert_eq!(snapshot(&levels), [false; 4]);
    }
}
