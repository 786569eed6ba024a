//! Constants used throughout the Fichero core crate.
//!
//! This module contains all path and directory constants to ensure
//! consistency across the codebase and make maintenance easier.

/// Logical directory all documents live under, relative to the storage base.
pub const STORE_DIR_NAME: &str = "app";

/// Default base directory for document storage when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "storage";
