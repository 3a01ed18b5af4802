pub mod context;
pub mod error;
pub mod tools;
pub mod traits;
pub mod types;

pub use context::ExecutionContext;
pub use error::{ScanError, StorageError};
pub use tools::ToolRegistry;
pub use traits::{Tool, Toolkit};
pub use types::{DocumentKind, ResolvedSource, ScanRequest, ScanResult, StorageType};
