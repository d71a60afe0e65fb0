//! CLI layer: command tree, argument resolution and dispatch

pub mod commands;
pub mod error;
pub mod output;
pub mod registry;

pub use commands::{build_registry, Action};
pub use error::{CliError, CliResult};
pub use registry::{CommandRegistry, CommandSpec, Context, Dispatch, FlagSpec, Invocation};
