use thiserror::Error;

/// Failures raised by an object-storage client.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("object is not valid UTF-8 text: {0}")]
    InvalidUtf8(String),

    #[error("storage request failed ({status}): {message}")]
    Http { status: u16, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Top-level error type for a document scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("file '{0}' not found")]
    NotFound(String),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not decode document: {0}")]
    Decode(#[source] anyhow::Error),

    #[error("text recognition failed: {0}")]
    Recognition(#[source] anyhow::Error),
}

impl ScanError {
    /// Whether this error means the document could not be located.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_file() {
        let err = ScanError::NotFound("invoice.pdf".into());
        assert_eq!(err.to_string(), "file 'invoice.pdf' not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn storage_error_converts() {
        let err: ScanError = StorageError::NotFound("a/b.png".into()).into();
        assert!(matches!(err, ScanError::Storage(StorageError::NotFound(_))));
        assert!(!err.is_not_found());
    }
}
