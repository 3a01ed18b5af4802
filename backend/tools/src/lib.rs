pub mod builder;
pub mod resolver;
pub mod scan;
pub mod tool;
pub mod toolkit;

pub use builder::scanner_from_config;
pub use resolver::{AgentScopedResolver, DirectoryResolver, PathResolver};
pub use scan::{DocumentScanner, StorageBackend, UNSUPPORTED_FORMAT};
pub use tool::{ScanDocumentTool, SCAN_DOCUMENT_TOOL_NAME};
pub use toolkit::OcrToolkit;
