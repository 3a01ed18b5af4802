//! Document scanning: resolve a file name, fetch it, and extract its text.
//!
//! The scan itself is blocking. Async hosts go through
//! [`ScanDocumentTool`](crate::ScanDocumentTool), which runs it on the
//! blocking pool.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use docscan_core::{
    DocumentKind, ExecutionContext, ResolvedSource, ScanError, ScanRequest, ScanResult,
    StorageError, StorageType,
};
use docscan_storage::ObjectStore;
use docscan_understanding::{PageRasterizer, TextRecognizer};
use tracing::{debug, info, warn};

use crate::resolver::PathResolver;

/// Returned for documents whose extension has no handler.
pub const UNSUPPORTED_FORMAT: &str = "Unsupported file type.";

/// Where resolved paths are read from.
#[derive(Clone)]
pub enum StorageBackend {
    Local,
    ObjectStorage(Arc<dyn ObjectStore>),
}

impl StorageBackend {
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::Local => StorageType::File,
            Self::ObjectStorage(_) => StorageType::S3,
        }
    }
}

pub struct DocumentScanner {
    resolver: Arc<dyn PathResolver>,
    backend: StorageBackend,
    recognizer: Arc<dyn TextRecognizer>,
    rasterizer: Arc<dyn PageRasterizer>,
    temp_dir: PathBuf,
}

impl DocumentScanner {
    /// A scanner reading from the local filesystem.
    pub fn new(
        resolver: Arc<dyn PathResolver>,
        recognizer: Arc<dyn TextRecognizer>,
        rasterizer: Arc<dyn PageRasterizer>,
    ) -> Self {
        Self {
            resolver,
            backend: StorageBackend::Local,
            recognizer,
            rasterizer,
            temp_dir: std::env::temp_dir(),
        }
    }

    pub fn with_object_store(mut self, store: Arc<dyn ObjectStore>) -> Self {
        self.backend = StorageBackend::ObjectStorage(store);
        self
    }

    /// Directory that remote objects are materialized into.
    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = temp_dir.into();
        self
    }

    pub fn backend(&self) -> &StorageBackend {
        &self.backend
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Scan one document and return its text.
    pub fn scan(
        &self,
        request: &ScanRequest,
        ctx: &ExecutionContext,
    ) -> Result<ScanResult, ScanError> {
        request.validate()?;
        let file_name = request.file_name.as_str();

        let resolved = self
            .resolver
            .resolve(file_name, ctx)
            .ok_or_else(|| ScanError::NotFound(file_name.to_string()))?;

        info!(
            file_name,
            backend = %self.backend.storage_type(),
            path = %resolved.display(),
            "Scanning document"
        );

        let mut materialized = None;
        let source = match &self.backend {
            StorageBackend::Local => ResolvedSource::local(resolved),
            StorageBackend::ObjectStorage(store) => {
                let key = resolved.to_string_lossy();
                if DocumentKind::from_path(&resolved) == DocumentKind::Text {
                    debug!(key = %key, "Reading text object directly");
                    let text = store
                        .read_text(&key)
                        .map_err(|e| storage_failure(e, file_name))?;
                    return Ok(ScanResult::new(text));
                }
                let temp = TempMaterialization::create(
                    &self.temp_dir,
                    file_name,
                    store.as_ref(),
                    &key,
                )?;
                let source = ResolvedSource::temporary(temp.path());
                materialized = Some(temp);
                source
            }
        };

        if !source.path.exists() {
            return Err(ScanError::NotFound(file_name.to_string()));
        }

        let extracted = self.extract(&source.path);
        let cleanup = match materialized {
            Some(temp) if source.is_temporary => temp.remove(),
            _ => Ok(()),
        };

        match (extracted, cleanup) {
            (Ok(text), Ok(())) => Ok(ScanResult::new(text)),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Err(cleanup_err)) => {
                warn!(
                    path = %source.path.display(),
                    "Failed to remove materialized object: {}", cleanup_err
                );
                Err(e)
            }
            (Err(e), Ok(())) => Err(e),
        }
    }

    /// Run the handler for the file's extension.
    fn extract(&self, path: &Path) -> Result<String, ScanError> {
        let kind = DocumentKind::from_path(path);
        debug!(%kind, path = %path.display(), "Dispatching document");

        match kind {
            DocumentKind::Pdf => {
                let pages = self.rasterizer.rasterize(path).map_err(ScanError::Decode)?;
                let mut texts = Vec::with_capacity(pages.len());
                for page in &pages {
                    texts.push(self.recognize(page)?);
                }
                info!(pages = texts.len(), engine = self.recognizer.name(), "PDF scanned");
                Ok(texts.join("\n"))
            }
            DocumentKind::Image => {
                let image = image::ImageReader::open(path)?
                    .with_guessed_format()?
                    .decode()
                    .map_err(|e| ScanError::Decode(e.into()))?;
                self.recognize(&image)
            }
            DocumentKind::Text => Ok(fs::read_to_string(path)?),
            DocumentKind::Unsupported => {
                warn!(path = %path.display(), "Unsupported document type");
                Ok(UNSUPPORTED_FORMAT.to_string())
            }
        }
    }

    fn recognize(&self, image: &image::DynamicImage) -> Result<String, ScanError> {
        let fragments = self
            .recognizer
            .recognize(image)
            .map_err(ScanError::Recognition)?;
        Ok(fragments.join(" "))
    }
}

/// A missing object means the document is missing.
fn storage_failure(err: StorageError, file_name: &str) -> ScanError {
    match err {
        StorageError::NotFound(_) => ScanError::NotFound(file_name.to_string()),
        other => ScanError::Storage(other),
    }
}

/// Local copy of a remote object, removed on drop unless removed explicitly.
struct TempMaterialization {
    path: PathBuf,
    removed: bool,
}

impl TempMaterialization {
    /// Copy `key` to `<temp_dir>/<base name of file_name>`.
    fn create(
        temp_dir: &Path,
        file_name: &str,
        store: &dyn ObjectStore,
        key: &str,
    ) -> Result<Self, ScanError> {
        let base = Path::new(file_name).file_name().ok_or_else(|| {
            ScanError::InvalidArguments(format!("'{file_name}' has no base name"))
        })?;

        let contents = store
            .read_bytes(key)
            .map_err(|e| storage_failure(e, file_name))?;

        let guard = Self {
            path: temp_dir.join(base),
            removed: false,
        };
        fs::write(&guard.path, &contents)?;
        debug!(path = %guard.path.display(), size = contents.len(), "Materialized object");
        Ok(guard)
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn remove(mut self) -> Result<(), ScanError> {
        self.removed = true;
        fs::remove_file(&self.path)?;
        debug!(path = %self.path.display(), "Removed materialized object");
        Ok(())
    }
}

impl Drop for TempMaterialization {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), "Failed to remove materialized object: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::DirectoryResolver;
    use anyhow::bail;
    use docscan_storage::InMemoryObjectStore;
    use image::DynamicImage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Reports each image's width so pages can be told apart.
    #[derive(Default)]
    struct WidthRecognizer {
        calls: AtomicUsize,
    }

    impl TextRecognizer for WidthRecognizer {
        fn name(&self) -> &str {
            "width"
        }

        fn recognize(&self, image: &DynamicImage) -> anyhow::Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec!["width".to_string(), image.width().to_string()])
        }
    }

    struct FailingRecognizer;

    impl TextRecognizer for FailingRecognizer {
        fn name(&self) -> &str {
            "failing"
        }

        fn recognize(&self, _image: &DynamicImage) -> anyhow::Result<Vec<String>> {
            bail!("engine crashed")
        }
    }

    /// Replaces the materialized file with a non-empty directory, so it
    /// cannot be removed, then succeeds or fails.
    struct BlockingRemoval {
        temp_path: PathBuf,
        succeed: bool,
    }

    impl TextRecognizer for BlockingRemoval {
        fn name(&self) -> &str {
            "blocking-removal"
        }

        fn recognize(&self, _image: &DynamicImage) -> anyhow::Result<Vec<String>> {
            fs::remove_file(&self.temp_path)?;
            fs::create_dir(&self.temp_path)?;
            fs::write(self.temp_path.join("held"), b"x")?;
            if self.succeed {
                Ok(vec!["read".to_string()])
            } else {
                bail!("engine crashed")
            }
        }
    }

    fn blocked_removal_scanner(temp: &Path, succeed: bool) -> DocumentScanner {
        let store = InMemoryObjectStore::new();
        store.insert("input/held.png", png_bytes(4));
        DocumentScanner::new(
            Arc::new(DirectoryResolver::new("input")),
            Arc::new(BlockingRemoval {
                temp_path: temp.join("held.png"),
                succeed,
            }),
            Arc::new(FixedPages(vec![])),
        )
        .with_object_store(Arc::new(store))
        .with_temp_dir(temp)
    }

    /// Pretends every PDF has pages of the given widths.
    struct FixedPages(Vec<u32>);

    impl PageRasterizer for FixedPages {
        fn rasterize(&self, _pdf_path: &Path) -> anyhow::Result<Vec<DynamicImage>> {
            Ok(self.0.iter().map(|w| DynamicImage::new_rgb8(*w, 2)).collect())
        }
    }

    fn png_bytes(width: u32) -> Vec<u8> {
        let mut out = Vec::new();
        DynamicImage::new_rgb8(width, 3)
            .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
            .unwrap();
        out
    }

    fn local_scanner(root: &Path) -> DocumentScanner {
        DocumentScanner::new(
            Arc::new(DirectoryResolver::new(root)),
            Arc::new(WidthRecognizer::default()),
            Arc::new(FixedPages(vec![10, 20, 30])),
        )
    }

    fn scan(scanner: &DocumentScanner, name: &str) -> Result<String, ScanError> {
        scanner
            .scan(&ScanRequest::new(name)?, &ExecutionContext::default())
            .map(|r| r.text)
    }

    #[test]
    fn local_text_returned_verbatim() {
        let root = tempfile::tempdir().unwrap();
        let contents = "line one\r\nzwei: äöü\n\n  trailing  ";
        fs::write(root.path().join("notes.txt"), contents).unwrap();

        assert_eq!(scan(&local_scanner(root.path()), "notes.txt").unwrap(), contents);
    }

    #[test]
    fn unsupported_extension_returns_sentinel() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("report.docx"), b"PK").unwrap();

        assert_eq!(
            scan(&local_scanner(root.path()), "report.docx").unwrap(),
            UNSUPPORTED_FORMAT
        );
    }

    #[test]
    fn missing_local_file_is_not_found() {
        let root = tempfile::tempdir().unwrap();
        let temp = tempfile::tempdir().unwrap();
        let scanner = local_scanner(root.path()).with_temp_dir(temp.path());

        let err = scan(&scanner, "ghost.png").unwrap_err();
        assert!(matches!(err, ScanError::NotFound(ref n) if n == "ghost.png"));
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn unresolvable_name_is_not_found() {
        let root = tempfile::tempdir().unwrap();
        assert!(scan(&local_scanner(root.path()), "../escape.txt")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn pdf_pages_joined_in_order() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("scan.PDF"), b"%PDF-1.4").unwrap();

        assert_eq!(
            scan(&local_scanner(root.path()), "scan.PDF").unwrap(),
            "width 10\nwidth 20\nwidth 30"
        );
    }

    #[test]
    fn image_fragments_joined_with_spaces() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("photo.png"), png_bytes(42)).unwrap();

        assert_eq!(scan(&local_scanner(root.path()), "photo.png").unwrap(), "width 42");
    }

    #[test]
    fn undecodable_image_is_a_decode_error() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("broken.jpg"), b"not a jpeg").unwrap();

        assert!(matches!(
            scan(&local_scanner(root.path()), "broken.jpg"),
            Err(ScanError::Decode(_))
        ));
    }

    #[test]
    fn object_store_text_skips_materialization() {
        let temp = tempfile::tempdir().unwrap();
        let store = InMemoryObjectStore::new();
        store.insert("input/notes.TXT", "from the bucket");
        let scanner = local_scanner(Path::new("input"))
            .with_object_store(Arc::new(store))
            .with_temp_dir(temp.path());

        assert_eq!(scan(&scanner, "notes.TXT").unwrap(), "from the bucket");
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn object_store_image_is_materialized_then_removed() {
        let temp = tempfile::tempdir().unwrap();
        let store = InMemoryObjectStore::new();
        store.insert("input/receipt.png", png_bytes(7));
        let scanner = local_scanner(Path::new("input"))
            .with_object_store(Arc::new(store))
            .with_temp_dir(temp.path());

        assert_eq!(scan(&scanner, "receipt.png").unwrap(), "width 7");
        assert!(!temp.path().join("receipt.png").exists());
    }

    #[test]
    fn temp_removed_when_recognition_fails() {
        let temp = tempfile::tempdir().unwrap();
        let store = InMemoryObjectStore::new();
        store.insert("input/page.png", png_bytes(5));
        let scanner = DocumentScanner::new(
            Arc::new(DirectoryResolver::new("input")),
            Arc::new(FailingRecognizer),
            Arc::new(FixedPages(vec![])),
        )
        .with_object_store(Arc::new(store))
        .with_temp_dir(temp.path());

        let err = scan(&scanner, "page.png").unwrap_err();
        assert!(matches!(err, ScanError::Recognition(_)));
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn removal_failure_after_success_propagates() {
        let temp = tempfile::tempdir().unwrap();
        let scanner = blocked_removal_scanner(temp.path(), true);

        assert!(matches!(scan(&scanner, "held.png"), Err(ScanError::Io(_))));
    }

    #[test]
    fn extraction_error_wins_over_removal_failure() {
        let temp = tempfile::tempdir().unwrap();
        let scanner = blocked_removal_scanner(temp.path(), false);

        let err = scan(&scanner, "held.png").unwrap_err();
        assert!(matches!(err, ScanError::Recognition(_)));
        assert!(temp.path().join("held.png").is_dir());
    }

    #[test]
    fn image_decoded_by_content_not_extension() {
        let root = tempfile::tempdir().unwrap();
        let mut jpeg = Vec::new();
        DynamicImage::new_rgb8(9, 3)
            .write_to(&mut std::io::Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
            .unwrap();
        fs::write(root.path().join("actually-jpeg.png"), jpeg).unwrap();

        assert_eq!(
            scan(&local_scanner(root.path()), "actually-jpeg.png").unwrap(),
            "width 9"
        );
    }

    #[test]
    fn missing_object_is_not_found() {
        let temp = tempfile::tempdir().unwrap();
        let scanner = local_scanner(Path::new("input"))
            .with_object_store(Arc::new(InMemoryObjectStore::new()))
            .with_temp_dir(temp.path());

        assert!(scan(&scanner, "absent.pdf").unwrap_err().is_not_found());
        assert!(scan(&scanner, "absent.txt").unwrap_err().is_not_found());
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn materialization_failure_propagates() {
        let store = InMemoryObjectStore::new();
        store.insert("input/a.png", png_bytes(1));
        let scanner = local_scanner(Path::new("input"))
            .with_object_store(Arc::new(store))
            .with_temp_dir("/nonexistent/docscan-temp");

        assert!(matches!(scan(&scanner, "a.png"), Err(ScanError::Io(_))));
    }

    #[test]
    fn repeated_scans_are_identical() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("doc.pdf"), b"%PDF").unwrap();
        let scanner = local_scanner(root.path());

        let first = scan(&scanner, "doc.pdf").unwrap();
        let second = scan(&scanner, "doc.pdf").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn recognizer_reused_across_pages() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("doc.pdf"), b"%PDF").unwrap();
        let recognizer = Arc::new(WidthRecognizer::default());
        let scanner = DocumentScanner::new(
            Arc::new(DirectoryResolver::new(root.path())),
            recognizer.clone(),
            Arc::new(FixedPages(vec![1, 2])),
        );

        scan(&scanner, "doc.pdf").unwrap();
        scan(&scanner, "doc.pdf").unwrap();
        assert_eq!(recognizer.calls.load(Ordering::SeqCst), 4);
    }
}
