//! Wire a [`DocumentScanner`] from configuration.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use docscan_config::{DocScanConfig, ResolverKind};
use docscan_core::StorageType;
use docscan_storage::{DirectoryObjectStore, HttpObjectStore};
use docscan_understanding::{PdftoppmRasterizer, TesseractRecognizer};
use tracing::info;

use crate::resolver::{AgentScopedResolver, DirectoryResolver, PathResolver};
use crate::scan::DocumentScanner;

/// Build a scanner backed by tesseract, pdftoppm, and the configured storage.
///
/// Nothing is spawned or fetched here; engines run on first scan.
pub fn scanner_from_config(config: &DocScanConfig) -> Result<DocumentScanner> {
    let storage = config.storage.clone().unwrap_or_default();
    let ocr = config.ocr.clone().unwrap_or_default();

    let root = storage
        .root
        .unwrap_or_else(|| PathBuf::from(docscan_config::defaults::DEFAULT_STORAGE_ROOT));
    let resolver: Arc<dyn PathResolver> = match config.resolver() {
        ResolverKind::Directory => Arc::new(DirectoryResolver::new(&root)),
        ResolverKind::AgentScoped => Arc::new(AgentScopedResolver::new(&root)),
    };

    let languages = ocr.languages.unwrap_or_else(|| {
        docscan_config::defaults::DEFAULT_LANGUAGES
            .iter()
            .map(|l| l.to_string())
            .collect()
    });
    let recognizer = TesseractRecognizer::new(
        ocr.tesseract_bin.unwrap_or_else(|| PathBuf::from("tesseract")),
        &languages,
    );
    let rasterizer = PdftoppmRasterizer::new(
        ocr.pdftoppm_bin.unwrap_or_else(|| PathBuf::from("pdftoppm")),
        ocr.dpi.unwrap_or(docscan_config::defaults::DEFAULT_DPI),
    );

    let mut scanner = DocumentScanner::new(resolver, Arc::new(recognizer), Arc::new(rasterizer));
    if let Some(temp_dir) = storage.temp_dir {
        scanner = scanner.with_temp_dir(temp_dir);
    }

    if config.storage_type() == StorageType::S3 {
        if let Some(mount) = storage.mount_dir {
            info!(mount = %mount.display(), "Scanner using mounted bucket");
            scanner = scanner.with_object_store(Arc::new(DirectoryObjectStore::new(mount)));
        } else {
            let endpoint = storage
                .endpoint
                .context("storage.endpoint is required for S3 storage")?;
            let bucket = storage
                .bucket
                .context("storage.bucket is required for S3 storage")?;
            let store = HttpObjectStore::new(&endpoint, &bucket)?;
            scanner = scanner.with_object_store(Arc::new(store));
            info!(%endpoint, %bucket, "Scanner using object storage");
        }
    } else {
        info!(root = %root.display(), "Scanner using local storage");
    }

    Ok(scanner)
}
