//! CLI-level errors (wraps infrastructure errors)

use std::error::Error as _;

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// Shown with every tool failure.
pub const TERMUX_API_HINT: &str = "Make sure Termux-API is installed: pkg install termux-api";

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    /// Rendered usage message for bad argv; no handler has run.
    #[error("{0}")]
    Usage(String),

    #[error("command tree misconfigured: {0}")]
    Registration(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Registration(_) => crate::exitcode::SOFTWARE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Application(app) => match app {
                    ApplicationError::Domain(DomainError::Decode { .. }) => {
                        crate::exitcode::DATAERR
                    }
                    ApplicationError::ToolUnavailable { .. } => crate::exitcode::UNAVAILABLE,
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                },
            },
        }
    }

    fn application(&self) -> Option<&ApplicationError> {
        match self {
            CliError::Infra(InfraError::Application(app)) => Some(app),
            _ => None,
        }
    }

    /// Remediation hint for the user, if one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self.application() {
            Some(ApplicationError::ToolUnavailable { .. }) => Some(TERMUX_API_HINT),
            _ => None,
        }
    }

    /// Lines printed after the main message.
    ///
    /// The underlying cause chain is only included when `verbose` is set.
    pub fn diagnostics(&self, verbose: bool) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(hint) = self.hint() {
            lines.push(hint.to_string());
        }
        if verbose {
            // wrapper layers repeat the inner message; only print what is new
            let mut last = self.to_string();
            let mut source = self.source();
            while let Some(cause) = source {
                let message = cause.to_string();
                if message != last {
                    lines.push(format!("Error details: {}", message));
                    last = message;
                }
                source = cause.source();
            }
        }
        lines
    }
}
