//! Domain layer: device status records, decoding and rendering
//!
//! This layer is independent of external concerns (no process spawning, no CLI, no config loading).

pub mod decode;
pub mod entities;
pub mod error;
pub mod render;

pub use decode::{decode, Schema};
pub use entities::*;
pub use error::DomainError;
pub use render::{Line, Render, Report};
