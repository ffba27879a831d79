//! System wiring, startup and tracing setup.

pub mod pos_system;
pub mod telemetry;

pub use pos_system::*;
pub use telemetry::*;
