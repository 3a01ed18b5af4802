use std::io::ErrorKind;
use std::path::PathBuf;

use docscan_core::StorageError;
use tracing::debug;

use crate::{object_key, ObjectStore};

/// A bucket mounted as a local directory (e.g. via a FUSE driver).
#[derive(Debug, Clone)]
pub struct DirectoryObjectStore {
    root: PathBuf,
}

impl DirectoryObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, key: &str) -> PathBuf {
        self.root.join(object_key(key))
    }
}

impl ObjectStore for DirectoryObjectStore {
    fn read_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.object_path(key);
        debug!(key, path = %path.display(), "Reading object from mounted bucket");
        std::fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(key.to_string()),
            _ => StorageError::Io(e),
        })
    }
}
