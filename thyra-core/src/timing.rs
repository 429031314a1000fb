//! Quantum delay model
//!
//! All dwells in the door cycle are expressed as `multiple × T(quantum)`,
//! where one quantum is 250 counts of a 16 MHz reference clock through a
//! selectable prescaler. The enum below carries the period math; the
//! blocking wait itself is behind [`QuantumDelay`] so the cycle
//! orchestrator can be exercised on the host.

/// Reference clock the quantum periods are derived from
pub const REFERENCE_CLOCK_HZ: u32 = 16_000_000;

/// Counter ticks per quantum unit
pub const TICKS_PER_UNIT: u32 = 250;

/// Prescaler choice selecting the delay granularity
///
/// Per-unit periods at the 16 MHz reference:
///
/// | choice    | prescale | period     |
/// |-----------|----------|------------|
/// | `Div1`    | 1        | 15.625 µs  |
/// | `Div8`    | 8        | 125 µs     |
/// | `Div64`   | 64       | 1 ms       |
/// | `Div256`  | 256      | 4 ms       |
/// | `Div1024` | 1024     | 16 ms      |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockQuantum {
    Div1,
    Div8,
    Div64,
    Div256,
    Div1024,
}

impl ClockQuantum {
    /// Prescale divisor applied to the reference clock
    pub const fn prescale(self) -> u32 {
        match self {
            ClockQuantum::Div1 => 1,
            ClockQuantum::Div8 => 8,
            ClockQuantum::Div64 => 64,
            ClockQuantum::Div256 => 256,
            ClockQuantum::Div1024 => 1024,
        }
    }

    /// Period of one quantum unit in nanoseconds
    ///
    /// 250 ticks × prescale / 16 MHz; exact for every choice.
    pub const fn period_ns(self) -> u32 {
        // 1 tick at /1 is 62.5 ns, so one unit is prescale × 15625 ns
        self.prescale() * 15_625
    }

    /// Period of one quantum unit in whole microseconds (rounds 15.625 µs
    /// down to 15 µs for `Div1`)
    pub const fn period_us(self) -> u32 {
        self.period_ns() / 1_000
    }
}

/// Blocking quantum delay generator
///
/// `wait` blocks the calling context for `multiple × period(quantum)`,
/// implemented as `multiple` repetitions of a single-unit delay. There
/// are no suspension semantics: the processor is occupied for the whole
/// duration, and a door cycle in progress keeps the cycle gate masked
/// across every wait.
pub trait QuantumDelay {
    fn wait(&mut self, multiple: u16, quantum: ClockQuantum);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_table() {
        assert_eq!(ClockQuantum::Div1.period_ns(), 15_625);
        assert_eq!(ClockQuantum::Div8.period_ns(), 125_000);
        assert_eq!(ClockQuantum::Div64.period_ns(), 1_000_000);
        assert_eq!(ClockQuantum::Div256.period_ns(), 4_000_000);
        assert_eq!(ClockQuantum::Div1024.period_ns(), 16_000_000);
    }

    #[test]
    fn test_period_matches_reference_clock() {
        // period × f_ref = prescale × ticks, compared in units where
        // the 62.5 ns tick stays exact
        for q in [
            ClockQuantum::Div1,
            ClockQuantum::Div8,
            ClockQuantum::Div64,
            ClockQuantum::Div256,
            ClockQuantum::Div1024,
        ] {
            assert_eq!(
                q.period_ns() as u64 * REFERENCE_CLOCK_HZ as u64,
                q.prescale() as u64 * TICKS_PER_UNIT as u64 * 1_000_000_000
            );
        }
    }

    #[test]
    fn test_whole_microseconds() {
        assert_eq!(ClockQuantum::Div1.period_us(), 15);
        assert_eq!(ClockQuantum::Div64.period_us(), 1_000);
        assert_eq!(ClockQuantum::Div1024.period_us(), 16_000);
    }
}
