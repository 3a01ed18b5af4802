mod doctor_cmd;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use docscan_config::{config_dir, config_file_path, DocScanConfig};
use docscan_core::{ExecutionContext, ToolRegistry, Toolkit};
use docscan_logging::{init_logger, LogOptions};
use docscan_tools::{scanner_from_config, OcrToolkit, SCAN_DOCUMENT_TOOL_NAME};

#[derive(Parser)]
#[command(name = "docscan")]
#[command(about = "DocScan — extract text from images and PDFs with OCR")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.docscan/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a document and print its text
    Scan {
        /// Logical file name, resolved against the storage root
        file_name: String,
        #[arg(long)]
        agent_id: Option<u64>,
        #[arg(long)]
        execution_id: Option<u64>,
        #[arg(long)]
        session: Option<String>,
    },
    /// Print the toolkit's tool descriptors as JSON
    Tools,
    /// Check configuration and external engines
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));

    if let Commands::Doctor = cli.command {
        return doctor_cmd::run(&config_path).await;
    }

    let config = docscan_config::load_and_prepare(&config_path)
        .await
        .with_context(|| format!("load config {}", config_path.display()))?;
    init_logger(&log_options(&config));
    debug!(path = %config_path.display(), "Config ready");

    let toolkit = OcrToolkit::new(Arc::new(scanner_from_config(&config)?));

    match cli.command {
        Commands::Scan {
            file_name,
            agent_id,
            execution_id,
            session,
        } => {
            let mut registry = ToolRegistry::new();
            registry.register_toolkit(&toolkit);
            let tool = registry
                .get(SCAN_DOCUMENT_TOOL_NAME)
                .context("scan tool not registered")?;

            let ctx = ExecutionContext {
                agent_id,
                agent_execution_id: execution_id,
                session_id: session,
            };
            let text = tool
                .execute(serde_json::json!({ "file_name": file_name }), &ctx)
                .await?;
            println!("{text}");
        }
        Commands::Tools => {
            let descriptors: Vec<_> = toolkit
                .get_tools()
                .iter()
                .map(|tool| {
                    serde_json::json!({
                        "name": tool.name(),
                        "description": tool.description(),
                        "parameters": tool.parameters(),
                    })
                })
                .collect();
            let listing = serde_json::json!({
                "toolkit": toolkit.name(),
                "description": toolkit.description(),
                "envKeys": toolkit.get_env_keys(),
                "tools": descriptors,
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        Commands::Doctor => unreachable!("handled before config load"),
    }

    Ok(())
}

fn log_options(config: &DocScanConfig) -> LogOptions {
    let logging = config.logging.clone().unwrap_or_default();
    let defaults = LogOptions::default();
    LogOptions {
        level: logging.level.unwrap_or(defaults.level),
        dir: logging.dir,
        json: logging.json.unwrap_or(defaults.json),
    }
}
