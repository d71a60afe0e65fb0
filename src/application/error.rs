//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Why an external tool could not produce output.
#[derive(Error, Debug)]
pub enum ToolFailure {
    #[error("executable not found: {0}")]
    NotFound(#[source] std::io::Error),

    #[error("failed to start: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("exited with {}{}", exit_label(.code), stderr_suffix(.stderr))]
    ExitStatus { code: Option<i32>, stderr: String },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("unable to run {tool}")]
    ToolUnavailable {
        tool: String,
        #[source]
        cause: ToolFailure,
    },

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
