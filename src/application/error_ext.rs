//! Extension trait attaching path context to raw I/O results.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Lifts an `io::Result` into the application layer, naming the failed
/// action and the path it ran against.
///
/// ```ignore
/// self.fs
///     .read_to_string(path)
///     .with_path_context("read step log", path)?
/// ```
pub trait IoResultExt<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(source),
        })
    }
}
