use std::sync::OnceLock;

use anyhow::Context;
use docscan_core::StorageError;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::{debug, info};
use url::Url;

use crate::{object_key, ObjectStore};

/// S3-compatible reader using path-style `GET {endpoint}/{bucket}/{key}` requests.
///
/// Works against public buckets, presigning proxies, and local gateways
/// such as MinIO with anonymous read enabled. The HTTP client is built on
/// first read, so construction never touches the network.
pub struct HttpObjectStore {
    client: OnceLock<Client>,
    endpoint: Url,
    bucket: String,
}

impl HttpObjectStore {
    pub fn new(endpoint: &str, bucket: impl Into<String>) -> anyhow::Result<Self> {
        let mut endpoint = Url::parse(endpoint).context("parse object storage endpoint")?;
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }
        Ok(Self {
            client: OnceLock::new(),
            endpoint,
            bucket: bucket.into(),
        })
    }

    pub fn object_url(&self, key: &str) -> Result<Url, StorageError> {
        let path = format!("{}/{}", self.bucket, object_key(key));
        self.endpoint
            .join(&path)
            .with_context(|| format!("build object URL for {key}"))
            .map_err(StorageError::Other)
    }
}

impl ObjectStore for HttpObjectStore {
    fn read_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let url = self.object_url(key)?;
        info!(bucket = %self.bucket, key, "[Storage] GET object");

        let resp = self
            .client
            .get_or_init(Client::new)
            .get(url)
            .send()
            .map_err(|e| StorageError::Other(e.into()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(key.to_string()));
        }
        if !status.is_success() {
            return Err(StorageError::Http {
                status: status.as_u16(),
                message: resp.text().unwrap_or_default(),
            });
        }

        let bytes = resp.bytes().map_err(|e| StorageError::Other(e.into()))?;
        debug!(key, size = bytes.len(), "[Storage] Object received");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_path_style_urls() {
        let store = HttpObjectStore::new("http://localhost:9000", "docs").unwrap();
        assert_eq!(
            store.object_url("/input/scan 1.png").unwrap().as_str(),
            "http://localhost:9000/docs/input/scan%201.png"
        );
    }

    #[test]
    fn keeps_endpoint_prefix() {
        let store = HttpObjectStore::new("https://gw.example.com/s3", "b").unwrap();
        assert_eq!(
            store.object_url("k.pdf").unwrap().as_str(),
            "https://gw.example.com/s3/b/k.pdf"
        );
    }

    #[test]
    fn rejects_bad_endpoint() {
        assert!(HttpObjectStore::new("not a url", "b").is_err());
    }
}
