//! Error conversion helpers for file I/O
//!
//! Provides an extension trait for attaching path context to `io::Result`.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// fs.write_atomic(&output, &text)
    ///     .with_path_context("write output", &output)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;

    /// Same as [`with_path_context`](Self::with_path_context) for reading
    /// the source document; a missing file becomes
    /// [`ApplicationError::InputNotFound`].
    fn with_input_context(self, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }

    fn with_input_context(self, path: &Path) -> ApplicationResult<T> {
        match self {
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ApplicationError::InputNotFound(path.to_path_buf()))
            }
            other => other.with_path_context("read input", path),
        }
    }
}
