//! Extension traits for attaching context to lower-level errors

use std::io;
use std::path::Path;

use super::error::{ApplicationError, ApplicationResult};

/// Extension trait for adding path context to I/O results.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// std::fs::read_to_string(&path)
    ///     .with_path_context("read navigation script", &path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::Io {
            context: format!("{}: {}", action, path.display()),
            source: e,
        })
    }
}
