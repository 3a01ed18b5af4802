use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use docscan_core::{ExecutionContext, ScanError, ScanRequest, Tool};
use serde_json::Value;
use tracing::info;

use crate::scan::DocumentScanner;

pub const SCAN_DOCUMENT_TOOL_NAME: &str = "Scan Document";

/// Scans documents (images or PDFs) and returns the extracted text.
pub struct ScanDocumentTool {
    scanner: Arc<DocumentScanner>,
}

impl ScanDocumentTool {
    pub fn new(scanner: Arc<DocumentScanner>) -> Self {
        Self { scanner }
    }
}

#[async_trait]
impl Tool for ScanDocumentTool {
    fn name(&self) -> &str {
        SCAN_DOCUMENT_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Scans documents (images or PDFs) and extracts text using OCR"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_name": {
                    "type": "string",
                    "description": "Name of the document (image/pdf) to scan"
                }
            },
            "required": ["file_name"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ExecutionContext) -> anyhow::Result<String> {
        let request: ScanRequest = serde_json::from_value(args)
            .map_err(|e| ScanError::InvalidArguments(e.to_string()))?;
        request.validate()?;

        info!(file_name = %request.file_name, agent_id = ?ctx.agent_id, "[ScanDocument] Invoked");

        let scanner = Arc::clone(&self.scanner);
        let ctx = ctx.clone();
        let result = tokio::task::spawn_blocking(move || scanner.scan(&request, &ctx))
            .await
            .context("scan task failed to complete")??;

        Ok(result.text)
    }
}
