//! Hardware abstraction traits
//!
//! These traits define the interface between the actuation engine
//! and hardware-specific implementations.

pub mod actuation;
pub mod sense;

pub use actuation::{LatchDrive, LockIndicator, MotorDirection, PwmTimer, WindingBus};
pub use sense::{LockSense, LockSignalState, SenseError, TemperatureProbe, TriggerInputs};
