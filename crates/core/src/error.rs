use crate::format::DocumentFormat;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("document name must end in .{expected}")]
    WrongExtension { expected: &'static str },
    #[error("a document named {0} already exists")]
    AlreadyExists(String),
    #[error("document {0} does not exist")]
    NotFound(String),
    #[error("content is not valid {0}")]
    InvalidContent(DocumentFormat),
    #[error("stored document {0} is not valid {1}")]
    Corrupted(String, DocumentFormat),
    #[error("post-write verification failed for document {0}")]
    VerificationFailed(String),
    #[error("failed to serialize document content: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to render CSV content: {0}")]
    CsvRender(csv::Error),
    #[error("storage error: {0}")]
    Storage(#[from] fichero_storage::StorageError),
}

pub type DocumentResult<T> = std::result::Result<T, DocumentError>;
