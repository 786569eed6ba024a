/// Errors that can occur when creating validated name types.
#[derive(Debug, thiserror::Error)]
pub enum NameError {
    /// The input name was empty
    #[error("Document name cannot be empty")]
    Empty,
    /// The input name contained a path separator or a NUL byte
    #[error("Document name cannot contain path separators")]
    Separator,
    /// The input name was a directory reference (`.` or `..`)
    #[error("Document name cannot be a directory reference")]
    Reserved,
}

/// A filename that is guaranteed to denote a single path segment.
///
/// This type wraps a `String` and ensures it is non-empty, contains no `/`,
/// `\` or NUL characters, and is not one of the reserved components `.` and
/// `..`. A `DocumentName` can therefore be joined under a storage root
/// without escaping it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentName(String);

impl DocumentName {
    /// Creates a new `DocumentName` from the given input.
    ///
    /// The input is taken verbatim; no trimming or normalisation is applied,
    /// since the name is the document's identity.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be converted to a string reference
    ///
    /// # Returns
    ///
    /// Returns `Ok(DocumentName)` if the input is a valid single path
    /// segment, or the matching `NameError` otherwise.
    pub fn new(input: impl AsRef<str>) -> Result<Self, NameError> {
        let name = input.as_ref();
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if name.contains(['/', '\\', '\0']) {
            return Err(NameError::Separator);
        }
        if name == "." || name == ".." {
            return Err(NameError::Reserved);
        }
        Ok(Self(name.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the extension of the name: the substring after the final `.`.
    ///
    /// Returns `None` when the name contains no dot at all. A name that ends
    /// in a dot has the empty extension, and a name that starts with its only
    /// dot (e.g. `.json`) has an extension like any other.
    pub fn extension(&self) -> Option<&str> {
        self.0.rfind('.').map(|idx| &self.0[idx + 1..])
    }
}

impl std::fmt::Display for DocumentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DocumentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for DocumentName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for DocumentName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DocumentName::new(&s).map_err(serde::de::Error::custom)
    }
}
