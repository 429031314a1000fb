//! Stepper output implementations

pub mod four_wire;

pub use four_wire::FourWireStepper;
