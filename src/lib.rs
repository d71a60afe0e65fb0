//! termux-cli: device status for Termux, rendered for humans
//!
//! Each invocation is one pass through a fixed pipeline: the command tree
//! resolves argv, a service runs the external status tool, the decoder turns
//! its JSON into a typed record and the renderer prints it.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
