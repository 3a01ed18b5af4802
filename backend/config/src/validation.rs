//! Config validation with user-friendly error messages.

use crate::schema::{DocScanConfig, StorageConfig};
use docscan_core::StorageType;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &DocScanConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_storage(config, &mut report);
    validate_ocr(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_storage(config: &DocScanConfig, report: &mut ValidationReport) {
    let Some(storage) = &config.storage else { return };

    if config.storage_type() == StorageType::S3 {
        if let Some(mount) = &storage.mount_dir {
            if !mount.is_dir() {
                report.warn(
                    "storage.mountDir",
                    format!("Bucket mount {} is not a directory", mount.display()),
                );
            }
        } else {
            validate_remote_bucket(storage, report);
        }
    }

    if let Some(root) = &storage.root {
        if config.storage_type() == StorageType::File && !root.exists() {
            report.warn(
                "storage.root",
                format!("Resource root {} does not exist yet", root.display()),
            );
        }
    }

    if let Some(temp) = &storage.temp_dir {
        if temp.as_os_str().is_empty() {
            report.error("storage.tempDir", "tempDir cannot be empty");
        }
    }
}

fn validate_remote_bucket(storage: &StorageConfig, report: &mut ValidationReport) {
    if storage.bucket.as_deref().map(str::is_empty).unwrap_or(true) {
        report.error("storage.bucket", "A bucket is required for S3 storage");
    }
    if storage.endpoint.as_deref().map(str::is_empty).unwrap_or(true) {
        report.error("storage.endpoint", "An endpoint is required for S3 storage");
    }
}

fn validate_ocr(config: &DocScanConfig, report: &mut ValidationReport) {
    let Some(ocr) = &config.ocr else { return };
    if let Some(languages) = &ocr.languages {
        if languages.is_empty() {
            report.error("ocr.languages", "At least one reader language is required");
        }
        if languages.iter().any(|l| l.trim().is_empty()) {
            report.error("ocr.languages", "Language codes cannot be empty");
        }
    }
    if let Some(dpi) = ocr.dpi {
        if !(50..=1200).contains(&dpi) {
            report.error("ocr.dpi", format!("dpi {dpi} is outside 50..=1200"));
        }
    }
}

fn validate_logging(config: &DocScanConfig, report: &mut ValidationReport) {
    let Some(level) = config.logging.as_ref().and_then(|l| l.level.as_deref()) else {
        return;
    };
    if !matches!(
        level.to_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    ) {
        report.warn(
            "logging.level",
            format!("Unknown level '{level}'; it will be parsed as a filter directive"),
        );
    }
}
