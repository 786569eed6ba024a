//! Fichero File Storage
//!
//! This crate provides the storage backend abstraction for the Fichero
//! document store, plus its local-filesystem implementation.
//!
//! ## Design Principles
//!
//! - Backends are keyed by relative paths; callers never see absolute paths
//! - The base directory is validated and canonicalised at construction time
//! - Paths are rejected if any component could escape the base directory
//! - Every operation is a single synchronous filesystem call
//! - Not-found and already-exists are distinguishable from generic I/O trouble
//!
//! ## Example Usage
//!
//! ```no_run
//! use fichero_storage::{LocalStorage, StorageBackend};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = LocalStorage::new(Path::new("storage"))?;
//! storage.put("app/greeting.json", b"{\n  \"hola\": true\n}")?;
//! assert!(storage.exists("app/greeting.json"));
//! # Ok(())
//! # }
//! ```

mod local;

pub use local::LocalStorage;

/// Errors that can occur during storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Base directory does not exist or is not a directory
    #[error("Invalid root directory: {0}")]
    InvalidRootDirectory(String),

    /// Path validation failed (potential directory traversal or unsafe path)
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// No file exists at the given path
    #[error("File not found: {0}")]
    NotFound(String),

    /// A file already exists at the given path
    #[error("File already exists: {0}")]
    AlreadyExists(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for storage operation results
pub type StorageResult<T> = Result<T, StorageError>;

/// File storage primitives over a configured base directory.
///
/// All paths are relative to the backend's base directory and use `/` as the
/// separator regardless of platform. Implementations must be safe to share
/// across threads; the document service holds one behind an `Arc`.
pub trait StorageBackend: Send + Sync {
    /// Returns whether a regular file exists at `path`.
    ///
    /// Directories and unresolvable paths report `false`.
    fn exists(&self, path: &str) -> bool;

    /// Lists the regular files directly inside `dir`.
    ///
    /// Returned entries are relative paths carrying the `dir` prefix, in the
    /// backend's natural listing order. A missing directory lists as empty;
    /// subdirectories are skipped.
    fn files(&self, dir: &str) -> StorageResult<Vec<String>>;

    /// Reads the full contents of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no file exists at `path`.
    fn get(&self, path: &str) -> StorageResult<Vec<u8>>;

    /// Writes `contents` to `path`, replacing any existing file in full.
    ///
    /// Parent directories are created as needed.
    fn put(&self, path: &str, contents: &[u8]) -> StorageResult<()>;

    /// Writes `contents` to `path` only if no file exists there yet.
    ///
    /// The existence check and the create are a single atomic operation, so
    /// two concurrent calls for the same path cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::AlreadyExists` if `path` is already taken.
    fn put_new(&self, path: &str, contents: &[u8]) -> StorageResult<()>;

    /// Deletes the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no file exists at `path`.
    fn delete(&self, path: &str) -> StorageResult<()>;
}
