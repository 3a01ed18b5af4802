use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// Input for the scan document tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    /// Name of the document (image/pdf) to scan.
    pub file_name: String,
}

impl ScanRequest {
    pub fn new(file_name: impl Into<String>) -> Result<Self, ScanError> {
        let request = Self {
            file_name: file_name.into(),
        };
        request.validate()?;
        Ok(request)
    }

    /// Reject requests that cannot name any document.
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.file_name.trim().is_empty() {
            return Err(ScanError::InvalidArguments(
                "file_name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// A concrete local path the scanner reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    pub path: PathBuf,
    /// Set when `path` is a materialized copy the scanner must delete.
    pub is_temporary: bool,
}

impl ResolvedSource {
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_temporary: false,
        }
    }

    pub fn temporary(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_temporary: true,
        }
    }
}

/// Text extracted from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub text: String,
}

impl ScanResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// How a document is handled, chosen by its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Image,
    Text,
    Unsupported,
}

impl DocumentKind {
    /// Classify a path by extension, ignoring case.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "pdf" => Self::Pdf,
            "jpg" | "jpeg" | "png" => Self::Image,
            "txt" => Self::Text,
            _ => Self::Unsupported,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::Text => "text",
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where documents live: the local filesystem or an object store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StorageType {
    #[default]
    File,
    S3,
}

impl StorageType {
    /// Parse a configured value, falling back to `File` for anything unknown.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "FILE",
            Self::S3 => "S3",
        }
    }
}

impl FromStr for StorageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FILE" => Ok(Self::File),
            "S3" => Ok(Self::S3),
            other => Err(format!("unknown storage type '{other}'")),
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
