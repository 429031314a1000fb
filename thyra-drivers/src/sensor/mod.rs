//! Temperature sensing implementations

pub mod band;

pub use band::{AdcReader, BandSensor, SensorConfig};
