//! Motor driver implementations

pub mod latch;

pub use latch::LatchMotor;
