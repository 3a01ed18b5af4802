//! Readers for documents kept in object storage.
//!
//! The scanner only needs two operations from a bucket: fetch an object as
//! text, or fetch it as raw bytes. Everything here is blocking.

pub mod directory;
pub mod http;
pub mod memory;

pub use directory::DirectoryObjectStore;
pub use http::HttpObjectStore;
pub use memory::InMemoryObjectStore;

use docscan_core::StorageError;

/// Abstract interface for an object-storage client.
pub trait ObjectStore: Send + Sync {
    /// Read an object and decode it as UTF-8.
    fn read_text(&self, key: &str) -> Result<String, StorageError> {
        let bytes = self.read_bytes(key)?;
        String::from_utf8(bytes).map_err(|_| StorageError::InvalidUtf8(key.to_string()))
    }

    /// Read an object verbatim.
    fn read_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError>;
}

/// Normalize a resolved path into an object key (no leading slash, `/` separators).
pub(crate) fn object_key(key: &str) -> String {
    key.replace('\\', "/").trim_start_matches('/').to_string()
}
