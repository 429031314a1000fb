//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in thyra-core over embedded-hal 1.0:
//!
//! - Four-wire winding bus for the handle stepper
//! - H-bridge latch/release motor (direction selects + PWM duty)
//! - Band-classifying temperature sensor with bounded conversion retry
//! - Quantum delay adapter over any `DelayNs`

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod motor;
pub mod sensor;
pub mod stepper;
