//! Storage traits and error types

use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create directory '{name}': {source}")]
    CreateDir {
        name: String,
        source: std::io::Error,
    },

    #[error("Failed to create file '{name}': {source}")]
    CreateFile {
        name: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for output storage backends
///
/// Grants the crawler exactly two capabilities: creating (or reusing) a
/// subdirectory under the output root, and creating a writable file inside
/// such a subdirectory. File contents are streamed by the caller.
pub trait OutputStore: Send + Sync {
    /// Creates a subdirectory under the output root, reusing it if present
    ///
    /// Returns the full path of the subdirectory.
    fn create_subdir(&self, name: &str) -> StorageResult<PathBuf>;

    /// Creates (truncating if present) a file inside a previously created
    /// subdirectory and returns a writable handle to it
    fn create_file(&self, dir: &Path, name: &str) -> StorageResult<File>;
}
