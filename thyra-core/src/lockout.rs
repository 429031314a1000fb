//! Mechanical lock-override handler
//!
//! A level-sensitive external line can force the door into a locked
//! state at any time except during an in-progress door cycle. The
//! handler is an explicit two-state machine driven by repeated polls of
//! the line; the caller executes the returned action against the PWM
//! timer and the lock indicator.
//!
//! If the line never deasserts the handler holds forever - the door
//! stays mechanically locked rather than silently resuming. The wait
//! diagnostics below observe that condition without changing it.

use heapless::HistoryBuffer;

use crate::cycle::CycleGate;
use crate::traits::LockSignalState;

/// Polls in `LockedWait` before the wait is flagged as exceeded
/// (≈30 s at a 1 ms poll interval). Observability only.
pub const WAIT_DIAGNOSTIC_POLLS: u32 = 30_000;

/// Retained lock-wait episode lengths
pub const WAIT_HISTORY_DEPTH: usize = 4;

/// Handler states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockoutState {
    /// Line deasserted (or assertion deferred); door operates normally
    Running,
    /// Line asserted and acted on; waiting for mechanical unlock
    LockedWait,
}

/// Action the caller must execute after a poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockoutAction {
    /// Nothing to do
    Idle,
    /// Line is asserted but a door cycle holds the mask; re-poll after
    /// the cycle completes (the line is level-triggered, nothing is lost)
    Deferred,
    /// Entering `LockedWait`: stop the PWM timer and drive the lock
    /// indicator low
    Engage,
    /// Still locked; keep polling
    Hold,
    /// Leaving `LockedWait`: drive the indicator high and restart the
    /// PWM timer with its original configuration
    Release,
}

/// Lock-override state machine
#[derive(Debug)]
pub struct Lockout {
    state: LockoutState,
    /// An assertion was observed while the gate was masked
    pending: bool,
    /// Polls spent in the current `LockedWait` episode
    wait_polls: u32,
    /// Latched once `wait_polls` passes [`WAIT_DIAGNOSTIC_POLLS`];
    /// cleared when a new episode begins
    wait_exceeded: bool,
    /// Lengths of recent episodes, in polls
    recent_waits: HistoryBuffer<u32, WAIT_HISTORY_DEPTH>,
}

impl Default for Lockout {
    fn default() -> Self {
        Self::new()
    }
}

impl Lockout {
    pub fn new() -> Self {
        Self {
            state: LockoutState::Running,
            pending: false,
            wait_polls: 0,
            wait_exceeded: false,
            recent_waits: HistoryBuffer::new(),
        }
    }

    /// Current handler state
    pub fn state(&self) -> LockoutState {
        self.state
    }

    /// Whether an assertion arrived while a cycle held the mask
    pub fn pending(&self) -> bool {
        self.pending
    }

    /// Polls spent in the current (or just-finished) episode
    pub fn wait_polls(&self) -> u32 {
        self.wait_polls
    }

    /// Whether the current episode has passed the diagnostic threshold
    pub fn wait_exceeded(&self) -> bool {
        self.wait_exceeded
    }

    /// Length of the most recently completed episode, in polls
    pub fn last_wait_polls(&self) -> Option<u32> {
        self.recent_waits.recent().copied()
    }

    /// Process one sample of the override line
    ///
    /// The caller executes the returned action, then keeps polling.
    pub fn poll(&mut self, line: LockSignalState, gate: &CycleGate) -> LockoutAction {
        match self.state {
            LockoutState::Running => match line {
                LockSignalState::Deasserted => LockoutAction::Idle,
                LockSignalState::Asserted => {
                    if gate.is_masked() {
                        self.pending = true;
                        LockoutAction::Deferred
                    } else {
                        self.pending = false;
                        self.state = LockoutState::LockedWait;
                        self.wait_polls = 0;
                        self.wait_exceeded = false;
                        LockoutAction::Engage
                    }
                }
            },
            LockoutState::LockedWait => match line {
                LockSignalState::Asserted => {
                    self.wait_polls = self.wait_polls.saturating_add(1);
                    if self.wait_polls >= WAIT_DIAGNOSTIC_POLLS {
                        self.wait_exceeded = true;
                    }
                    LockoutAction::Hold
                }
                LockSignalState::Deasserted => {
                    self.recent_waits.write(self.wait_polls);
                    // Clear any duplicate assertion latched during the wait
                    self.pending = false;
                    self.state = LockoutState::Running;
                    LockoutAction::Release
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LockSignalState::{Asserted, Deasserted};

    #[test]
    fn test_idle_while_deasserted() {
        let gate = CycleGate::new();
        let mut lockout = Lockout::new();

        for _ in 0..10 {
            assert_eq!(lockout.poll(Deasserted, &gate), LockoutAction::Idle);
            assert_eq!(lockout.state(), LockoutState::Running);
        }
    }

    #[test]
    fn test_engage_hold_release() {
        let gate = CycleGate::new();
        let mut lockout = Lockout::new();

        assert_eq!(lockout.poll(Asserted, &gate), LockoutAction::Engage);
        assert_eq!(lockout.state(), LockoutState::LockedWait);

        for _ in 0..5 {
            assert_eq!(lockout.poll(Asserted, &gate), LockoutAction::Hold);
        }

        assert_eq!(lockout.poll(Deasserted, &gate), LockoutAction::Release);
        assert_eq!(lockout.state(), LockoutState::Running);
        assert_eq!(lockout.last_wait_polls(), Some(5));
    }

    #[test]
    fn test_deferred_while_gate_masked() {
        let gate = CycleGate::new();
        let mut lockout = Lockout::new();

        let guard = gate.mask();
        assert_eq!(lockout.poll(Asserted, &gate), LockoutAction::Deferred);
        assert_eq!(lockout.state(), LockoutState::Running);
        assert!(lockout.pending());

        // Level-triggered: the same assertion engages once the mask drops
        drop(guard);
        assert_eq!(lockout.poll(Asserted, &gate), LockoutAction::Engage);
        assert!(!lockout.pending());
    }

    #[test]
    fn test_release_clears_pending() {
        let gate = CycleGate::new();
        let mut lockout = Lockout::new();

        {
            let _guard = gate.mask();
            lockout.poll(Asserted, &gate);
        }
        lockout.poll(Asserted, &gate);
        assert_eq!(lockout.poll(Deasserted, &gate), LockoutAction::Release);
        assert!(!lockout.pending());
    }

    #[test]
    fn test_wait_diagnostic_latches() {
        let gate = CycleGate::new();
        let mut lockout = Lockout::new();

        lockout.poll(Asserted, &gate);
        for _ in 0..WAIT_DIAGNOSTIC_POLLS - 1 {
            lockout.poll(Asserted, &gate);
            assert!(!lockout.wait_exceeded());
        }
        lockout.poll(Asserted, &gate);
        assert!(lockout.wait_exceeded());

        // Still just holding - the diagnostic never changes behavior
        assert_eq!(lockout.poll(Asserted, &gate), LockoutAction::Hold);

        // A fresh episode starts clean
        lockout.poll(Deasserted, &gate);
        assert_eq!(lockout.poll(Asserted, &gate), LockoutAction::Engage);
        assert!(!lockout.wait_exceeded());
        assert_eq!(lockout.wait_polls(), 0);
    }

    #[test]
    fn test_wait_history() {
        let gate = CycleGate::new();
        let mut lockout = Lockout::new();

        for episode_len in [3u32, 7, 1] {
            lockout.poll(Asserted, &gate);
            for _ in 0..episode_len {
                lockout.poll(Asserted, &gate);
            }
            lockout.poll(Deasserted, &gate);
            assert_eq!(lockout.last_wait_polls(), Some(episode_len));
        }
    }
}
