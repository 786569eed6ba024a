//! Document formats and their parsed content representations.
//!
//! A [`DocumentFormat`] bundles everything that differs between the JSON and
//! CSV resources: the required filename suffix, the well-formedness check,
//! and the serialised forms written to storage. Handlers stay format-agnostic
//! and pass the format through to the document service.
//!
//! ## Parsed Content
//!
//! Decoded payloads are held as [`DocumentContent`]:
//!
//! - JSON documents as a generic [`serde_json::Value`] (the service is
//!   content-agnostic, so no fixed schema applies)
//! - CSV documents as a table of rows of string fields, with no header
//!   semantics imposed (the first row is data like any other)
//!
//! Equality on `DocumentContent` is structural, which is what the post-write
//! verification in update relies on: pretty and compact renderings of the
//! same value compare equal after parsing.

use crate::error::{DocumentError, DocumentResult};
use fichero_types::DocumentName;
use serde_json::Value;

/// The two document formats served by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Csv,
}

/// Why a payload failed to parse in a given format.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl DocumentFormat {
    /// Returns the filename extension required of documents in this format.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// Returns whether `name` carries this format's suffix.
    ///
    /// The rule is the one creation enforces: the name must end in
    /// `.<extension>` with a non-empty prefix before it.
    pub fn matches(self, name: &DocumentName) -> bool {
        let suffix = match self {
            Self::Json => ".json",
            Self::Csv => ".csv",
        };
        name.as_str()
            .strip_suffix(suffix)
            .is_some_and(|prefix| !prefix.is_empty())
    }

    /// Parses raw bytes as a document in this format.
    ///
    /// # Errors
    ///
    /// Returns the underlying parse failure when the bytes are not
    /// well-formed: malformed JSON, or CSV with inconsistent field counts,
    /// bad quoting, or invalid UTF-8.
    pub fn parse(self, bytes: &[u8]) -> Result<DocumentContent, ParseError> {
        match self {
            Self::Json => Ok(DocumentContent::Json(serde_json::from_slice(bytes)?)),
            Self::Csv => Ok(DocumentContent::Csv(parse_csv(bytes)?)),
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Csv => write!(f, "CSV"),
        }
    }
}

/// A decoded document payload.
///
/// Structural equality between two values is format-aware deep equality,
/// independent of the bytes they were parsed from.
#[derive(Clone, Debug, PartialEq)]
pub enum DocumentContent {
    Json(Value),
    Csv(Vec<Vec<String>>),
}

impl DocumentContent {
    /// Renders the content in the indented form used when a document is created.
    ///
    /// CSV has a single canonical rendering, so this matches
    /// [`to_compact`](Self::to_compact) for tables.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError` if serialisation fails.
    pub fn to_pretty(&self) -> DocumentResult<Vec<u8>> {
        match self {
            Self::Json(value) => {
                serde_json::to_vec_pretty(value).map_err(DocumentError::Serialization)
            }
            Self::Csv(rows) => render_csv(rows),
        }
    }

    /// Renders the content in the compact form used when a document is updated.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError` if serialisation fails.
    pub fn to_compact(&self) -> DocumentResult<Vec<u8>> {
        match self {
            Self::Json(value) => serde_json::to_vec(value).map_err(DocumentError::Serialization),
            Self::Csv(rows) => render_csv(rows),
        }
    }

    /// Returns the JSON view of the content, as carried in response envelopes.
    ///
    /// JSON documents are their own view; CSV tables serialise as an array of
    /// arrays of strings.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Csv(rows) => Value::Array(
                rows.iter()
                    .map(|row| {
                        Value::Array(row.iter().map(|field| Value::String(field.clone())).collect())
                    })
                    .collect(),
            ),
        }
    }
}

/// Parses bytes as headerless CSV, rejecting ragged rows.
fn parse_csv(bytes: &[u8]) -> Result<Vec<Vec<String>>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_owned).collect());
    }
    Ok(rows)
}

/// Renders a table back to CSV bytes.
fn render_csv(rows: &[Vec<String>]) -> DocumentResult<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        for row in rows {
            writer.write_record(row).map_err(DocumentError::CsvRender)?;
        }
        writer
            .flush()
            .map_err(|e| DocumentError::CsvRender(csv::Error::from(e)))?;
    }
    Ok(buffer)
}
