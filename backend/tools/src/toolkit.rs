use std::sync::Arc;

use docscan_core::{Tool, Toolkit};

use crate::scan::DocumentScanner;
use crate::tool::ScanDocumentTool;

/// Toolkit exposing document OCR to a host runtime.
pub struct OcrToolkit {
    scanner: Arc<DocumentScanner>,
}

impl OcrToolkit {
    pub fn new(scanner: Arc<DocumentScanner>) -> Self {
        Self { scanner }
    }
}

impl Toolkit for OcrToolkit {
    fn name(&self) -> &str {
        "OCR Toolkit"
    }

    fn description(&self) -> &str {
        "Toolkit for scanning documents (images or PDFs) and extracting their text"
    }

    fn get_tools(&self) -> Vec<Arc<dyn Tool>> {
        vec![Arc::new(ScanDocumentTool::new(Arc::clone(&self.scanner)))]
    }

    fn get_env_keys(&self) -> Vec<String> {
        Vec::new()
    }
}
