//! H-bridge latch/release motor driver
//!
//! The latch motor gets a direction through two mutually exclusive
//! select lines and its drive strength through an 8-bit duty register
//! mapped onto a PWM channel. Selects switch break-before-make so both
//! halves of the bridge are never driven at once.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use thyra_core::traits::{LatchDrive, MotorDirection};

/// Full scale of the 8-bit duty register
const DUTY_REGISTER_MAX: u16 = u8::MAX as u16;

/// H-bridge motor driver over two select pins and a PWM channel
pub struct LatchMotor<F, R, P> {
    forward: F,
    reverse: R,
    pwm: P,
}

impl<F: OutputPin, R: OutputPin, P: SetDutyCycle> LatchMotor<F, R, P> {
    /// Take ownership of the outputs, starting de-energized with duty 0
    pub fn new(forward: F, reverse: R, pwm: P) -> Self {
        let mut motor = Self {
            forward,
            reverse,
            pwm,
        };
        motor.set_direction(MotorDirection::Off);
        motor.set_duty(0x00);
        motor
    }
}

impl<F: OutputPin, R: OutputPin, P: SetDutyCycle> LatchDrive for LatchMotor<F, R, P> {
    fn set_direction(&mut self, direction: MotorDirection) {
        match direction {
            MotorDirection::Forward => {
                let _ = self.reverse.set_low();
                let _ = self.forward.set_high();
            }
            MotorDirection::Reverse => {
                let _ = self.forward.set_low();
                let _ = self.reverse.set_high();
            }
            MotorDirection::Off => {
                let _ = self.forward.set_low();
                let _ = self.reverse.set_low();
            }
        }
    }

    fn set_duty(&mut self, duty: u8) {
        // Scale the 8-bit register value onto the channel's native range
        let _ = self
            .pwm
            .set_duty_cycle_fraction(duty as u16, DUTY_REGISTER_MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;

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

    struct MockPwm<'a> {
        duty: &'a Cell<u16>,
        max: u16,
    }

    impl embedded_hal::pwm::ErrorType for MockPwm<'_> {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm<'_> {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty.set(duty);
            Ok(())
        }
    }

    fn motor<'a>(
        fwd: &'a Cell<bool>,
        rev: &'a Cell<bool>,
        duty: &'a Cell<u16>,
        max: u16,
    ) -> LatchMotor<MockPin<'a>, MockPin<'a>, MockPwm<'a>> {
        LatchMotor::new(
            MockPin { level: fwd },
            MockPin { level: rev },
            MockPwm { duty, max },
        )
    }

    #[test]
    fn test_starts_off() {
        let (fwd, rev, duty) = (Cell::new(true), Cell::new(true), Cell::new(99));
        let _motor = motor(&fwd, &rev, &duty, 255);

        assert!(!fwd.get());
        assert!(!rev.get());
        assert_eq!(duty.get(), 0);
    }

    #[test]
    fn test_directions_mutually_exclusive() {
        let (fwd, rev, duty) = (Cell::new(false), Cell::new(false), Cell::new(0));
        let mut motor = motor(&fwd, &rev, &duty, 255);

        motor.set_direction(MotorDirection::Forward);
        assert!(fwd.get());
        assert!(!rev.get());

        motor.set_direction(MotorDirection::Reverse);
        assert!(!fwd.get());
        assert!(rev.get());

        motor.set_direction(MotorDirection::Off);
        assert!(!fwd.get());
        assert!(!rev.get());
    }

    #[test]
    fn test_duty_identity_on_8bit_channel() {
        let (fwd, rev, duty) = (Cell::new(false), Cell::new(false), Cell::new(0));
        let mut motor = motor(&fwd, &rev, &duty, 255);

        motor.set_duty(0x1A);
        assert_eq!(duty.get(), 0x1A);

        motor.set_duty(0xFF);
        assert_eq!(duty.get(), 0xFF);

        motor.set_duty(0x00);
        assert_eq!(duty.get(), 0x00);
    }

    #[test]
    fn test_duty_scales_to_channel_range() {
        let (fwd, rev, duty) = (Cell::new(false), Cell::new(false), Cell::new(0));
        let mut motor = motor(&fwd, &rev, &duty, 1000);

        motor.set_duty(0xFF);
        assert_eq!(duty.get(), 1000);

        motor.set_duty(0x40);
        // 64/255 of 1000
        assert_eq!(duty.get(), 250);

        motor.set_duty(0x00);
        assert_eq!(duty.get(), 0);
    }
}
