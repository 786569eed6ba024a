//! Local-filesystem storage backend implementation
//!
//! This module provides [`LocalStorage`], the production implementation of
//! [`StorageBackend`](crate::StorageBackend) over a directory on local disk.
//!
//! # Security Model
//!
//! The backend enforces strict boundaries:
//!
//! - The base directory is canonicalised at construction time
//! - Relative paths are validated component-by-component; anything other
//!   than plain segments (absolute paths, `.`, `..`) is rejected
//! - File operations never follow a path outside the base directory
//!
//! # Implementation Notes
//!
//! - The constructor performs validation only; directories under the base
//!   are created lazily by writes
//! - `put_new` relies on the platform's atomic create-new open flag, so the
//!   existence check and the create cannot be interleaved by another caller

use crate::{StorageBackend, StorageError, StorageResult};
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

/// Storage backend rooted at a directory on the local filesystem
///
/// All operations take paths relative to the base directory handed to
/// [`LocalStorage::new`]. The base must exist up front; subdirectories named
/// by relative paths are created on demand by writes.
#[derive(Debug)]
pub struct LocalStorage {
    /// Canonicalised base directory all relative paths resolve under
    base_directory: PathBuf,
}

impl LocalStorage {
    /// Creates a new `LocalStorage` rooted at `base_directory`
    ///
    /// # Arguments
    ///
    /// * `base_directory` - The directory all relative paths resolve under
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidRootDirectory` if:
    /// - The base directory does not exist or is not a directory
    /// - Path canonicalisation fails
    pub fn new(base_directory: &Path) -> Result<Self, StorageError> {
        if !base_directory.exists() {
            return Err(StorageError::InvalidRootDirectory(format!(
                "Directory does not exist: {}",
                base_directory.display()
            )));
        }

        if !base_directory.is_dir() {
            return Err(StorageError::InvalidRootDirectory(format!(
                "Path is not a directory: {}",
                base_directory.display()
            )));
        }

        let base_directory = base_directory.canonicalize().map_err(|e| {
            StorageError::InvalidRootDirectory(format!(
                "Cannot canonicalize path {}: {}",
                base_directory.display(),
                e
            ))
        })?;

        Ok(Self { base_directory })
    }

    /// Returns the canonicalised base directory
    #[must_use]
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Resolves a relative path to an absolute path under the base directory
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidPath` if the path is empty, absolute, or
    /// contains any component other than a plain segment (`.` and `..` are
    /// rejected outright).
    fn resolve(&self, path: &str) -> StorageResult<PathBuf> {
        let relative = Path::new(path);
        if path.is_empty()
            || !relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)))
        {
            return Err(StorageError::InvalidPath(path.to_owned()));
        }
        Ok(self.base_directory.join(relative))
    }

    /// Creates the parent directory of `file_path` if it is missing
    fn ensure_parent(&self, file_path: &Path) -> StorageResult<()> {
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create directory {}: {}", parent.display(), e),
                ))
            })?;
        }
        Ok(())
    }
}

impl StorageBackend for LocalStorage {
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.is_file()).unwrap_or(false)
    }

    fn files(&self, dir: &str) -> StorageResult<Vec<String>> {
        let dir_path = self.resolve(dir)?;

        let entries = match fs::read_dir(&dir_path) {
            Ok(entries) => entries,
            // A directory nothing has been written to yet lists as empty
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to list directory {}: {}", dir_path.display(), e),
                )))
            }
        };

        let mut names = Vec::new();
        for entry in entries.flatten() {
            let file_type = entry.file_type()?;
            if !file_type.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(format!("{}/{}", dir, name));
            }
        }
        Ok(names)
    }

    fn get(&self, path: &str) -> StorageResult<Vec<u8>> {
        let file_path = self.resolve(path)?;

        match fs::read(&file_path) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_owned()))
            }
            Err(e) => Err(StorageError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read file {}: {}", file_path.display(), e),
            ))),
        }
    }

    fn put(&self, path: &str, contents: &[u8]) -> StorageResult<()> {
        let file_path = self.resolve(path)?;
        self.ensure_parent(&file_path)?;

        fs::write(&file_path, contents).map_err(|e| {
            StorageError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write file {}: {}", file_path.display(), e),
            ))
        })
    }

    fn put_new(&self, path: &str, contents: &[u8]) -> StorageResult<()> {
        let file_path = self.resolve(path)?;
        self.ensure_parent(&file_path)?;

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&file_path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(StorageError::AlreadyExists(path.to_owned()))
            }
            Err(e) => {
                return Err(StorageError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create file {}: {}", file_path.display(), e),
                )))
            }
        };

        file.write_all(contents).map_err(|e| {
            StorageError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write file {}: {}", file_path.display(), e),
            ))
        })
    }

    fn delete(&self, path: &str) -> StorageResult<()> {
        let file_path = self.resolve(path)?;

        match fs::remove_file(&file_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_owned()))
            }
            Err(e) => Err(StorageError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to delete file {}: {}", file_path.display(), e),
            ))),
        }
    }
}
