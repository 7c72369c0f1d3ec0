//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the step format or of the build
/// contract. These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("malformed step {raw:?}: expected exactly one {separator:?}")]
    MalformedStep { raw: String, separator: &'static str },

    #[error("malformed step {raw:?}: empty {role} name")]
    EmptyToken { raw: String, role: &'static str },

    #[error("empty step sequence: the derivation root is the result of the last step")]
    EmptySequence,
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
