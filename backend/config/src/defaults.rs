//! Default value application.

use crate::schema::{DocScanConfig, LoggingConfig, OcrConfig, StorageConfig};
use std::path::PathBuf;

pub const DEFAULT_STORAGE_ROOT: &str = "workspace/input";
pub const DEFAULT_LANGUAGES: [&str; 2] = ["en", "de"];
pub const DEFAULT_DPI: u32 = 200;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Fill every unset field with its default.
pub fn apply_all_defaults(mut config: DocScanConfig) -> DocScanConfig {
    let storage = config.storage.get_or_insert_with(StorageConfig::default);
    storage.storage_type.get_or_insert_with(Default::default);
    storage.resolver.get_or_insert_with(Default::default);
    storage
        .root
        .get_or_insert_with(|| PathBuf::from(DEFAULT_STORAGE_ROOT));
    storage.temp_dir.get_or_insert_with(std::env::temp_dir);

    let ocr = config.ocr.get_or_insert_with(OcrConfig::default);
    ocr.languages
        .get_or_insert_with(|| DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect());
    ocr.tesseract_bin
        .get_or_insert_with(|| PathBuf::from("tesseract"));
    ocr.pdftoppm_bin
        .get_or_insert_with(|| PathBuf::from("pdftoppm"));
    ocr.dpi.get_or_insert(DEFAULT_DPI);

    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging
        .level
        .get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    logging.json.get_or_insert(false);

    config
}
