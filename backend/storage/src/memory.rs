use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use docscan_core::StorageError;

use crate::{object_key, ObjectStore};

/// Simple in-memory bucket, for tests and embedding.
#[derive(Clone, Default)]
pub struct InMemoryObjectStore {
    objects: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: &str, data: impl Into<Vec<u8>>) {
        let mut objects = self
            .objects
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        objects.insert(object_key(key), data.into());
    }

    pub fn len(&self) -> usize {
        self.objects
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn read_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let objects = self
            .objects
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        objects
            .get(&object_key(key))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }
}
