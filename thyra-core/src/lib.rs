//! Board-agnostic actuation engine for the Thyra door controller
//!
//! This crate contains all control logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (winding bus, latch drive, sensing)
//! - Stepper phase sequencer for the handle motor
//! - Atomic open/close door cycle orchestrator
//! - Temperature-gated access policy
//! - Mechanical lock-override state machine
//! - Quantum delay model

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod cycle;
pub mod lockout;
pub mod policy;
pub mod sequencer;
pub mod timing;
pub mod traits;
