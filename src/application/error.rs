//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("step {line}: {source}")]
    Sequence {
        line: usize,
        #[source]
        source: DomainError,
    },

    #[error("search outcome reports no path to the target")]
    NoPathFound,

    #[error("payload contains no steps")]
    EmptyPayload,

    #[error("unexpected payload shape: {message}")]
    Payload { message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
