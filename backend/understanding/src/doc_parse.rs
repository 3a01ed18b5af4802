//! PDF page rasterization
//!
//! Splits a PDF into one image per page so each page can go through OCR.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use image::DynamicImage;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

/// Matches pdftoppm output names such as `page-7.png` or `page-007.png`.
static PAGE_FILE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^page-(\d+)\.png$").expect("valid page pattern"));

/// Converts a PDF into page images, in page order.
pub trait PageRasterizer: Send + Sync {
    fn rasterize(&self, pdf_path: &Path) -> Result<Vec<DynamicImage>>;
}

/// Rasterizer backed by poppler's `pdftoppm`.
#[derive(Debug, Clone)]
pub struct PdftoppmRasterizer {
    binary: PathBuf,
    dpi: u32,
}

impl PdftoppmRasterizer {
    pub fn new(binary: impl Into<PathBuf>, dpi: u32) -> Self {
        Self {
            binary: binary.into(),
            dpi,
        }
    }
}

impl Default for PdftoppmRasterizer {
    fn default() -> Self {
        Self::new("pdftoppm", 200)
    }
}

impl PageRasterizer for PdftoppmRasterizer {
    fn rasterize(&self, pdf_path: &Path) -> Result<Vec<DynamicImage>> {
        info!(path = %pdf_path.display(), dpi = self.dpi, "Rasterizing PDF pages");

        let scratch = tempfile::Builder::new()
            .prefix("docscan-pages-")
            .tempdir()
            .context("create page scratch directory")?;
        let prefix = scratch.path().join("page");

        let output = Command::new(&self.binary)
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-png")
            .arg(pdf_path)
            .arg(&prefix)
            .output()
            .with_context(|| format!("spawn {}", self.binary.display()))?;

        if !output.status.success() {
            bail!(
                "pdftoppm exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let pages = ordered_page_files(scratch.path())?;
        debug!(pages = pages.len(), "PDF rasterized");

        pages
            .iter()
            .map(|page| image::open(page).with_context(|| format!("decode {}", page.display())))
            .collect()
    }
}

/// List rendered page files sorted by page number.
fn ordered_page_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pages = Vec::new();
    for entry in std::fs::read_dir(dir).context("read page scratch directory")? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(caps) = PAGE_FILE_PATTERN.captures(name) {
            let number: u32 = caps[1].parse().context("parse page number")?;
            pages.push((number, path));
        }
    }
    pages.sort_by_key(|(number, _)| *number);
    Ok(pages.into_iter().map(|(_, path)| path).collect())
}
