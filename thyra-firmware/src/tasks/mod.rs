//! Embassy task implementations

pub mod control;
pub mod lockout;

pub use control::control_task;
pub use lockout::lockout_task;
