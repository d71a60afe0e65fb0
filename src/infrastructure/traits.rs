//! I/O boundary traits for testability
//!
//! These traits abstract process spawning and host introspection, allowing
//! services to be tested with mock implementations.

use std::io;
use std::process::Output;

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Run a command with arguments, blocking until it exits.
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output>;
}

/// Host introspection abstraction.
pub trait SystemProbe: Send + Sync {
    /// Operating system name (e.g. "android", "linux").
    fn os(&self) -> String;

    /// CPU architecture (e.g. "aarch64").
    fn arch(&self) -> String;

    /// Number of logical CPUs.
    fn cpu_count(&self) -> usize;

    /// Hostname, if it can be determined.
    fn hostname(&self) -> Option<String>;

    /// Value of an environment variable, if set and valid unicode.
    fn env_var(&self, name: &str) -> Option<String>;

    /// Id of the current process.
    fn pid(&self) -> u32;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real command runner implementation.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        std::process::Command::new(cmd).args(args).output()
    }
}

/// Real probe backed by the standard library and the `hostname` crate.
#[derive(Debug, Default)]
pub struct RealSystemProbe;

impl SystemProbe for RealSystemProbe {
    fn os(&self) -> String {
        std::env::consts::OS.to_string()
    }

    fn arch(&self) -> String {
        std::env::consts::ARCH.to_string()
    }

    fn cpu_count(&self) -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }

    fn hostname(&self) -> Option<String> {
        hostname::get()
            .ok()
            .map(|h| h.to_string_lossy().to_string())
    }

    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn pid(&self) -> u32 {
        std::process::id()
    }
}
