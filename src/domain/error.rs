//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent payloads that violate the expected schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("error parsing {schema}: {detail}")]
    Decode { schema: &'static str, detail: String },
}
