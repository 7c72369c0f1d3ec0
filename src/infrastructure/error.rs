//! Infrastructure errors: I/O failures plus everything from the layers below.

use thiserror::Error;

use crate::application::ApplicationError;

#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl InfraError {
    /// Wrap a raw I/O error with a short description of what was attempted.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type InfraResult<T> = Result<T, InfraError>;
