//! DocScan configuration schema, typed for serde YAML/JSON deserialization.

use docscan_core::StorageType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the DocScan plugin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocScanConfig {
    /// Where documents are read from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageConfig>,

    /// Recognition engine settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr: Option<OcrConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

/// Strategy used to turn a logical file name into a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolverKind {
    /// `<root>/<file_name>`
    #[default]
    Directory,
    /// `<root>/agent_<id>/execution_<id>/<file_name>`, falling back to the root
    AgentScoped,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<StorageType>,

    /// Resource root that logical file names are resolved against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Directory for materialized copies of remote objects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolver: Option<ResolverKind>,

    /// Object storage endpoint, e.g. `http://localhost:9000`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,

    /// Local mount of the bucket; read through it instead of `endpoint`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrConfig {
    /// Reader languages, e.g. `["en", "de"]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tesseract_bin: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdftoppm_bin: Option<PathBuf>,

    /// Render resolution for PDF pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpi: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// `trace` | `debug` | `info` | `warn` | `error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Directory for rolling JSON log files; console only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Emit console output as JSON
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

impl DocScanConfig {
    /// Active storage backend; `FILE` unless configured otherwise.
    pub fn storage_type(&self) -> StorageType {
        self.storage
            .as_ref()
            .and_then(|s| s.storage_type)
            .unwrap_or_default()
    }

    pub fn resolver(&self) -> ResolverKind {
        self.storage
            .as_ref()
            .and_then(|s| s.resolver)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_yaml() {
        let yaml = r#"
storage:
  type: S3
  root: /data/input
  tempDir: /scratch
  resolver: agentScoped
  endpoint: http://minio:9000
  bucket: documents
  mountDir: /mnt/documents
ocr:
  languages: [en]
  dpi: 300
"#;
        let config: DocScanConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.storage_type(), StorageType::S3);
        assert_eq!(config.resolver(), ResolverKind::AgentScoped);
        let storage = config.storage.unwrap();
        assert_eq!(storage.temp_dir.unwrap(), PathBuf::from("/scratch"));
        assert_eq!(storage.bucket.as_deref(), Some("documents"));
        assert_eq!(storage.mount_dir, Some(PathBuf::from("/mnt/documents")));
        assert_eq!(config.ocr.unwrap().dpi, Some(300));
    }

    #[test]
    fn empty_config_uses_file_storage() {
        let config: DocScanConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.storage_type(), StorageType::File);
        assert_eq!(config.resolver(), ResolverKind::Directory);
    }
}
