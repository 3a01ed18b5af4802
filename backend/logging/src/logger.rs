//! Structured Logger
//!
//! Wraps `tracing` with environment-based level control, a console layer,
//! and an optional daily-rotated NDJSON file.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file prefix inside the log directory.
const LOG_FILE_NAME: &str = "docscan.log";

#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for `docscan.log.YYYY-MM-DD`; no file output when `None`.
    pub dir: Option<PathBuf>,
    /// JSON console output instead of human-readable lines.
    pub json: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
            json: false,
        }
    }
}

impl LogOptions {
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }
}

/// Initialize the global structured logger.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_logger(options: &LogOptions) -> bool {
    let file_layer = options.dir.as_ref().map(|dir| {
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_NAME);
        fmt::layer().json().with_writer(appender).with_ansi(false)
    });

    // Console goes to stderr so stdout stays clean for extracted text.
    let json_console = options
        .json
        .then(|| fmt::layer().json().with_writer(std::io::stderr));
    let plain_console = (!options.json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(options.filter())
        .with(json_console)
        .with(plain_console)
        .with(file_layer)
        .try_init()
        .is_ok()
}
