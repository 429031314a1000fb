//! Quantum delay adapter
//!
//! Bridges the core's quantum delay contract onto any embedded-hal
//! `DelayNs`. One `delay_ns` call per quantum unit, matching the
//! repeated counter-overflow loop the contract models.

use embedded_hal::delay::DelayNs;

use thyra_core::timing::{ClockQuantum, QuantumDelay};

/// `QuantumDelay` over an embedded-hal delay
pub struct HalDelay<D> {
    delay: D,
}

impl<D: DelayNs> HalDelay<D> {
    pub fn new(delay: D) -> Self {
        Self { delay }
    }
}

impl<D: DelayNs> QuantumDelay for HalDelay<D> {
    fn wait(&mut self, multiple: u16, quantum: ClockQuantum) {
        for _ in 0..multiple {
            self.delay.delay_ns(quantum.period_ns());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct MockDelay<'a> {
        calls: &'a Cell<u32>,
        total_ns: &'a Cell<u64>,
    }

    impl DelayNs for MockDelay<'_> {
        fn delay_ns(&mut self, ns: u32) {
            self.calls.set(self.calls.get() + 1);
            self.total_ns.set(self.total_ns.get() + ns as u64);
        }
    }

    #[test]
    fn test_one_call_per_unit() {
        let calls = Cell::new(0);
        let total_ns = Cell::new(0);
        let mut delay = HalDelay::new(MockDelay {
            calls: &calls,
            total_ns: &total_ns,
        });

        delay.wait(25, ClockQuantum::Div64);
        assert_eq!(calls.get(), 25);
        assert_eq!(total_ns.get(), 25_000_000);
    }

    #[test]
    fn test_zero_multiple_is_free() {
        let calls = Cell::new(0);
        let total_ns = Cell::new(0);
        let mut delay = HalDelay::new(MockDelay {
            calls: &calls,
            total_ns: &total_ns,
        });

        delay.wait(0, ClockQuantum::Div1024);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_quantum_scales_period() {
        let calls = Cell::new(0);
        let total_ns = Cell::new(0);
        let mut delay = HalDelay::new(MockDelay {
            calls: &calls,
            total_ns: &total_ns,
        });

        delay.wait(10, ClockQuantum::Div1);
        assert_eq!(total_ns.get(), 156_250);
    }
}
