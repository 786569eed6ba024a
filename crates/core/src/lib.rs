//! # Fichero Core
//!
//! Core business logic for the Fichero document store.
//!
//! This crate contains pure data operations over a storage backend:
//! - Listing, creating, reading, updating and deleting named documents
//! - Format rules for the JSON and CSV resources (suffixes, well-formedness,
//!   stored renderings)
//! - Post-write verification of updates
//!
//! **No API concerns**: HTTP routing, status codes and response envelopes
//! belong in `api-rest`.

pub mod constants;
pub mod documents;
pub mod error;
pub mod format;

pub use constants::{DEFAULT_DATA_DIR, STORE_DIR_NAME};
pub use documents::DocumentService;
pub use error::{DocumentError, DocumentResult};
pub use format::{DocumentContent, DocumentFormat};
