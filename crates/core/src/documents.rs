//! Document CRUD operations over a storage backend.
//!
//! This module provides the [`DocumentService`], the single entry point for
//! listing, creating, reading, updating and deleting stored documents. It
//! handles:
//!
//! - Mapping document names onto relative storage paths under `app/`
//! - Enforcing the per-format filename suffix on creation
//! - Validating payload well-formedness before anything is written
//! - The post-write verification read that update performs
//!
//! ## Storage Layout
//!
//! Documents live flat under one logical directory of the storage backend:
//!
//! ```text
//! <base>/
//! └── app/
//!     ├── report.json
//!     └── figures.csv
//! ```
//!
//! The filename is the document's identity; nothing else is recorded about
//! it. Creation writes the indented rendering, update overwrites with the
//! compact rendering, so equality between stored bytes is never assumed
//! anywhere; comparisons are structural, over parsed content.
//!
//! ## Pure Data Operations
//!
//! This module contains only data operations. HTTP concerns such as status
//! codes and response envelopes belong to `api-rest`.

use crate::constants::STORE_DIR_NAME;
use crate::error::{DocumentError, DocumentResult};
use crate::format::{DocumentContent, DocumentFormat};
use fichero_storage::{StorageBackend, StorageError};
use fichero_types::DocumentName;
use std::sync::Arc;

/// Service for managing document operations.
///
/// Holds the injected storage backend and carries no other state; cloning is
/// cheap and every clone operates on the same backend.
#[derive(Clone)]
pub struct DocumentService {
    storage: Arc<dyn StorageBackend>,
}

impl DocumentService {
    /// Creates a new document service over the given storage backend.
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    /// Lists the names of stored documents in the given format.
    ///
    /// Only files whose extension equals the format's extension exactly
    /// (case-sensitive) are surfaced; everything else under the storage root
    /// is invisible. Names are bare filenames in the backend's listing order.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Storage` if the backend cannot list the root.
    pub fn list(&self, format: DocumentFormat) -> DocumentResult<Vec<String>> {
        let entries = self.storage.files(STORE_DIR_NAME)?;

        let mut names = Vec::new();
        for entry in entries {
            let bare = entry.rsplit_once('/').map_or(entry.as_str(), |(_, name)| name);
            let Ok(name) = DocumentName::new(bare) else {
                tracing::warn!("skipping unlistable storage entry: {}", entry);
                continue;
            };
            if name.extension() == Some(format.extension()) {
                names.push(bare.to_owned());
            }
        }
        Ok(names)
    }

    /// Creates a new document from a raw payload.
    ///
    /// The payload is parsed before anything touches storage, and the write
    /// itself is atomic create-if-absent, so a concurrent duplicate create
    /// cannot overwrite: one caller wins and the other sees
    /// `DocumentError::AlreadyExists`. The stored bytes are the indented
    /// rendering of the parsed value, not the caller's raw text.
    ///
    /// # Arguments
    ///
    /// * `format` - The resource format the document must satisfy
    /// * `name` - The document name; must carry the format's suffix
    /// * `content` - The raw payload to validate and store
    ///
    /// # Errors
    ///
    /// Returns `DocumentError` if:
    /// - The name does not end in the format's suffix (`WrongExtension`)
    /// - A document with this name already exists (`AlreadyExists`)
    /// - The payload is not well-formed in the format (`InvalidContent`)
    /// - The backend write fails (`Storage`)
    pub fn store(
        &self,
        format: DocumentFormat,
        name: &DocumentName,
        content: &str,
    ) -> DocumentResult<()> {
        if !format.matches(name) {
            return Err(DocumentError::WrongExtension {
                expected: format.extension(),
            });
        }

        let path = Self::document_path(name);
        if self.storage.exists(&path) {
            return Err(DocumentError::AlreadyExists(name.to_string()));
        }

        let parsed = format.parse(content.as_bytes()).map_err(|e| {
            tracing::debug!("rejected {} payload for {}: {}", format, name, e);
            DocumentError::InvalidContent(format)
        })?;
        let rendered = parsed.to_pretty()?;

        match self.storage.put_new(&path, &rendered) {
            Ok(()) => {
                tracing::debug!("stored document {}", name);
                Ok(())
            }
            // Lost the race against a concurrent create of the same name
            Err(StorageError::AlreadyExists(_)) => {
                Err(DocumentError::AlreadyExists(name.to_string()))
            }
            Err(e) => Err(DocumentError::Storage(e)),
        }
    }

    /// Reads a stored document and returns its parsed content.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError` if:
    /// - No document with this name exists (`NotFound`)
    /// - The stored bytes do not parse in the format (`Corrupted`)
    /// - The backend read fails (`Storage`)
    pub fn show(
        &self,
        format: DocumentFormat,
        name: &DocumentName,
    ) -> DocumentResult<DocumentContent> {
        let path = Self::document_path(name);
        if !self.storage.exists(&path) {
            return Err(DocumentError::NotFound(name.to_string()));
        }

        let bytes = match self.storage.get(&path) {
            Ok(bytes) => bytes,
            // Deleted between the existence check and the read
            Err(StorageError::NotFound(_)) => {
                return Err(DocumentError::NotFound(name.to_string()))
            }
            Err(e) => return Err(DocumentError::Storage(e)),
        };

        format.parse(&bytes).map_err(|e| {
            tracing::warn!("stored document {} failed to parse as {}: {}", name, format, e);
            DocumentError::Corrupted(name.to_string(), format)
        })
    }

    /// Replaces the content of an existing document.
    ///
    /// The new payload is written in compact form, then read back, re-parsed
    /// and compared structurally against the decoded input. A mismatch is
    /// reported as `VerificationFailed` even though the write itself went
    /// through: detecting corruption outranks reporting success.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError` if:
    /// - No document with this name exists (`NotFound`)
    /// - The payload is not well-formed in the format (`InvalidContent`)
    /// - The backend write or read-back fails (`Storage`)
    /// - The re-read content does not match the input (`VerificationFailed`)
    pub fn update(
        &self,
        format: DocumentFormat,
        name: &DocumentName,
        content: &str,
    ) -> DocumentResult<()> {
        let path = Self::document_path(name);
        if !self.storage.exists(&path) {
            return Err(DocumentError::NotFound(name.to_string()));
        }

        let parsed = format.parse(content.as_bytes()).map_err(|e| {
            tracing::debug!("rejected {} payload for {}: {}", format, name, e);
            DocumentError::InvalidContent(format)
        })?;
        let rendered = parsed.to_compact()?;

        self.storage.put(&path, &rendered)?;

        let written = self.storage.get(&path)?;
        let reread = format.parse(&written).map_err(|e| {
            tracing::error!("document {} failed to parse after update: {}", name, e);
            DocumentError::VerificationFailed(name.to_string())
        })?;
        if reread != parsed {
            tracing::error!("document {} does not match its payload after update", name);
            return Err(DocumentError::VerificationFailed(name.to_string()));
        }

        tracing::debug!("updated document {}", name);
        Ok(())
    }

    /// Deletes a stored document.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError` if:
    /// - No document with this name exists (`NotFound`), including one that
    ///   vanished between the existence check and the delete
    /// - The backend delete fails (`Storage`)
    pub fn destroy(&self, name: &DocumentName) -> DocumentResult<()> {
        let path = Self::document_path(name);
        if !self.storage.exists(&path) {
            return Err(DocumentError::NotFound(name.to_string()));
        }

        match self.storage.delete(&path) {
            Ok(()) => {
                tracing::debug!("deleted document {}", name);
                Ok(())
            }
            Err(StorageError::NotFound(_)) => Err(DocumentError::NotFound(name.to_string())),
            Err(e) => Err(DocumentError::Storage(e)),
        }
    }

    /// Returns the relative storage path for a document name.
    #[must_use]
    fn document_path(name: &DocumentName) -> String {
        format!("{}/{}", STORE_DIR_NAME, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fichero_storage::{LocalStorage, StorageResult};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    /// Helper to create a service over a fresh temporary storage directory
    fn create_test_service() -> (TempDir, DocumentService) {
        let temp = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp.path()).unwrap();
        let service = DocumentService::new(Arc::new(storage));
        (temp, service)
    }

    fn name(s: &str) -> DocumentName {
        DocumentName::new(s).unwrap()
    }

    #[test]
    fn test_store_then_show_round_trip() {
        let (_temp, service) = create_test_service();

        service
            .store(DocumentFormat::Json, &name("a.json"), "{\"x\": 1}")
            .unwrap();
        let content = service.show(DocumentFormat::Json, &name("a.json")).unwrap();

        assert_eq!(content.to_value(), json!({"x": 1}));
    }

    #[test]
    fn test_store_writes_the_indented_rendering() {
        let (temp, service) = create_test_service();

        service
            .store(DocumentFormat::Json, &name("a.json"), "{\"b\":2,\"a\":1}")
            .unwrap();

        let stored = fs::read(temp.path().join("app/a.json")).unwrap();
        let expected = serde_json::to_vec_pretty(&json!({"a": 1, "b": 2})).unwrap();
        assert_eq!(stored, expected);
    }

    #[test]
    fn test_store_rejects_names_without_the_suffix() {
        let (_temp, service) = create_test_service();

        for bad in ["a.txt", "a.csv", "json", ".json", "a.JSON"] {
            let result = service.store(DocumentFormat::Json, &name(bad), "{}");
            assert!(
                matches!(result, Err(DocumentError::WrongExtension { expected: "json" })),
                "expected WrongExtension for {}",
                bad
            );
        }
    }

    #[test]
    fn test_store_rejects_duplicates_and_keeps_the_original() {
        let (temp, service) = create_test_service();

        service
            .store(DocumentFormat::Json, &name("a.json"), "{\"first\": true}")
            .unwrap();
        let result = service.store(DocumentFormat::Json, &name("a.json"), "{\"second\": true}");

        assert!(matches!(result, Err(DocumentError::AlreadyExists(_))));
        let stored = fs::read_to_string(temp.path().join("app/a.json")).unwrap();
        assert!(stored.contains("first"));
    }

    #[test]
    fn test_store_invalid_json_creates_no_file() {
        let (temp, service) = create_test_service();

        let result = service.store(DocumentFormat::Json, &name("a.json"), "{broken");

        assert!(matches!(
            result,
            Err(DocumentError::InvalidContent(DocumentFormat::Json))
        ));
        assert!(!temp.path().join("app/a.json").exists());
    }

    #[test]
    fn test_show_missing_document() {
        let (_temp, service) = create_test_service();

        let result = service.show(DocumentFormat::Json, &name("missing.json"));

        assert!(matches!(result, Err(DocumentError::NotFound(_))));
    }

    #[test]
    fn test_show_corrupted_document() {
        let (temp, service) = create_test_service();

        fs::create_dir_all(temp.path().join("app")).unwrap();
        fs::write(temp.path().join("app/bad.json"), "not json at all").unwrap();

        let result = service.show(DocumentFormat::Json, &name("bad.json"));

        assert!(matches!(
            result,
            Err(DocumentError::Corrupted(_, DocumentFormat::Json))
        ));
    }

    #[test]
    fn test_update_missing_document_creates_no_file() {
        let (temp, service) = create_test_service();

        let result = service.update(DocumentFormat::Json, &name("missing.json"), "{}");

        assert!(matches!(result, Err(DocumentError::NotFound(_))));
        assert!(!temp.path().join("app/missing.json").exists());
    }

    #[test]
    fn test_update_rejects_invalid_payload_and_keeps_the_original() {
        let (temp, service) = create_test_service();

        service
            .store(DocumentFormat::Json, &name("a.json"), "{\"x\": 1}")
            .unwrap();
        let result = service.update(DocumentFormat::Json, &name("a.json"), "{broken");

        assert!(matches!(
            result,
            Err(DocumentError::InvalidContent(DocumentFormat::Json))
        ));
        let stored = fs::read_to_string(temp.path().join("app/a.json")).unwrap();
        assert!(stored.contains("\"x\""));
    }

    #[test]
    fn test_update_writes_the_compact_rendering() {
        let (temp, service) = create_test_service();

        service
            .store(DocumentFormat::Json, &name("a.json"), "{\"x\": 1}")
            .unwrap();
        service
            .update(DocumentFormat::Json, &name("a.json"), "{\"x\": 2, \"y\": [3]}")
            .unwrap();

        let stored = fs::read(temp.path().join("app/a.json")).unwrap();
        let expected = serde_json::to_vec(&json!({"x": 2, "y": [3]})).unwrap();
        assert_eq!(stored, expected);
    }

    #[test]
    fn test_destroy_missing_document() {
        let (_temp, service) = create_test_service();

        let result = service.destroy(&name("missing.json"));

        assert!(matches!(result, Err(DocumentError::NotFound(_))));
    }

    #[test]
    fn test_full_document_lifecycle() {
        let (_temp, service) = create_test_service();
        let doc = name("a.json");

        service
            .store(DocumentFormat::Json, &doc, "{\"x\": 1}")
            .unwrap();
        let shown = service.show(DocumentFormat::Json, &doc).unwrap();
        assert_eq!(shown.to_value(), json!({"x": 1}));

        service
            .update(DocumentFormat::Json, &doc, "{\"x\": 2}")
            .unwrap();
        let shown = service.show(DocumentFormat::Json, &doc).unwrap();
        assert_eq!(shown.to_value(), json!({"x": 2}));

        service.destroy(&doc).unwrap();
        let result = service.show(DocumentFormat::Json, &doc);
        assert!(matches!(result, Err(DocumentError::NotFound(_))));
    }

    #[test]
    fn test_list_filters_on_exact_extension() {
        let (temp, service) = create_test_service();

        service
            .store(DocumentFormat::Json, &name("a.json"), "{}")
            .unwrap();
        service
            .store(DocumentFormat::Csv, &name("b.csv"), "x,y\n")
            .unwrap();
        fs::write(temp.path().join("app/notes.txt"), "plain").unwrap();
        fs::write(temp.path().join("app/upper.JSON"), "{}").unwrap();

        let mut json_names = service.list(DocumentFormat::Json).unwrap();
        json_names.sort();
        assert_eq!(json_names, vec!["a.json"]);

        let csv_names = service.list(DocumentFormat::Csv).unwrap();
        assert_eq!(csv_names, vec!["b.csv"]);
    }

    #[test]
    fn test_list_is_empty_before_any_write() {
        let (_temp, service) = create_test_service();

        assert!(service.list(DocumentFormat::Json).unwrap().is_empty());
        assert!(service.list(DocumentFormat::Csv).unwrap().is_empty());
    }

    #[test]
    fn test_list_ignores_subdirectories() {
        let (temp, service) = create_test_service();

        service
            .store(DocumentFormat::Json, &name("real.json"), "{}")
            .unwrap();
        fs::create_dir_all(temp.path().join("app/folder.json")).unwrap();

        let names = service.list(DocumentFormat::Json).unwrap();
        assert_eq!(names, vec!["real.json"]);
    }

    #[test]
    fn test_csv_round_trip_and_verification() {
        let (temp, service) = create_test_service();
        let doc = name("rows.csv");

        service
            .store(DocumentFormat::Csv, &doc, "name,age\nana,31\n")
            .unwrap();
        let shown = service.show(DocumentFormat::Csv, &doc).unwrap();
        assert_eq!(shown.to_value(), json!([["name", "age"], ["ana", "31"]]));

        service
            .update(DocumentFormat::Csv, &doc, "name,age\nana,32\n")
            .unwrap();
        let stored = fs::read_to_string(temp.path().join("app/rows.csv")).unwrap();
        assert!(stored.contains("32"));
    }

    #[test]
    fn test_csv_rejects_ragged_rows() {
        let (_temp, service) = create_test_service();

        let result = service.store(DocumentFormat::Csv, &name("bad.csv"), "a,b\nc\n");

        assert!(matches!(
            result,
            Err(DocumentError::InvalidContent(DocumentFormat::Csv))
        ));
    }

    #[test]
    fn test_empty_csv_document_is_valid() {
        let (_temp, service) = create_test_service();
        let doc = name("empty.csv");

        service.store(DocumentFormat::Csv, &doc, "").unwrap();
        let shown = service.show(DocumentFormat::Csv, &doc).unwrap();

        assert_eq!(shown.to_value(), json!([]));
    }

    /// Backend wrapper that stores fixed bytes instead of what it was given
    struct MiswritingStorage {
        inner: LocalStorage,
        written: &'static [u8],
    }

    impl StorageBackend for MiswritingStorage {
        fn exists(&self, path: &str) -> bool {
            self.inner.exists(path)
        }

        fn files(&self, dir: &str) -> StorageResult<Vec<String>> {
            self.inner.files(dir)
        }

        fn get(&self, path: &str) -> StorageResult<Vec<u8>> {
            self.inner.get(path)
        }

        fn put(&self, path: &str, _contents: &[u8]) -> StorageResult<()> {
            self.inner.put(path, self.written)
        }

        fn put_new(&self, path: &str, contents: &[u8]) -> StorageResult<()> {
            self.inner.put_new(path, contents)
        }

        fn delete(&self, path: &str) -> StorageResult<()> {
            self.inner.delete(path)
        }
    }

    /// Helper to create a service whose writes land as `written`
    fn miswriting_service(temp: &TempDir, written: &'static [u8]) -> DocumentService {
        let storage = MiswritingStorage {
            inner: LocalStorage::new(temp.path()).unwrap(),
            written,
        };
        DocumentService::new(Arc::new(storage))
    }

    #[test]
    fn test_update_fails_verification_when_stored_bytes_differ() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("app")).unwrap();
        fs::write(temp.path().join("app/v.json"), "{\"v\": 1}").unwrap();
        let service = miswriting_service(&temp, b"{\"written\": \"elsewhere\"}");

        let result = service.update(DocumentFormat::Json, &name("v.json"), "{\"v\": 2}");

        assert!(matches!(result, Err(DocumentError::VerificationFailed(_))));
    }

    #[test]
    fn test_update_fails_verification_when_stored_bytes_do_not_parse() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("app")).unwrap();
        fs::write(temp.path().join("app/v.json"), "{\"v\": 1}").unwrap();
        let service = miswriting_service(&temp, b"cut short");

        let result = service.update(DocumentFormat::Json, &name("v.json"), "{\"v\": 2}");

        assert!(matches!(result, Err(DocumentError::VerificationFailed(_))));
    }

    /// Backend whose writes always fail with an I/O error
    struct UnwritableStorage;

    fn full_disk() -> StorageError {
        StorageError::Io(std::io::Error::other("no space left on device"))
    }

    impl StorageBackend for UnwritableStorage {
        fn exists(&self, _path: &str) -> bool {
            false
        }

        fn files(&self, _dir: &str) -> StorageResult<Vec<String>> {
            Ok(Vec::new())
        }

        fn get(&self, path: &str) -> StorageResult<Vec<u8>> {
            Err(StorageError::NotFound(path.to_owned()))
        }

        fn put(&self, _path: &str, _contents: &[u8]) -> StorageResult<()> {
            Err(full_disk())
        }

        fn put_new(&self, _path: &str, _contents: &[u8]) -> StorageResult<()> {
            Err(full_disk())
        }

        fn delete(&self, path: &str) -> StorageResult<()> {
            Err(StorageError::NotFound(path.to_owned()))
        }
    }

    #[test]
    fn test_store_surfaces_backend_write_failures() {
        let service = DocumentService::new(Arc::new(UnwritableStorage));

        let result = service.store(DocumentFormat::Json, &name("a.json"), "{\"x\": 1}");

        assert!(matches!(result, Err(DocumentError::Storage(_))));
    }
}
