//! Application services
//!
//! Concrete service implementations that run one status pipeline each.
//! Services depend on I/O boundary traits (CommandRunner, SystemProbe)
//! but are themselves concrete structs, not traits.

mod battery;
mod system;

pub use battery::BatteryService;
pub use system::SystemService;
