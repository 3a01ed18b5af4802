//! `docscan-config` — DocScan plugin configuration.
//!
//! Provides:
//! - Typed config schema (storage backend, OCR engine, logging)
//! - YAML loading
//! - `${ENV_VAR}` substitution and well-known env overrides
//! - Default value application
//! - Validation with errors and warnings

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, process_env, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config, load_config_value};
pub use schema::{DocScanConfig, LoggingConfig, OcrConfig, ResolverKind, StorageConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Load, substitute env vars, apply overrides and defaults, then validate.
///
/// This is the main entry point for loading a config at runtime.
pub async fn load_and_prepare(path: &Path) -> Result<DocScanConfig> {
    load_and_prepare_with(path, &process_env()).await
}

/// Same as [`load_and_prepare`] with an explicit environment.
pub async fn load_and_prepare_with(
    path: &Path,
    env: &HashMap<String, String>,
) -> Result<DocScanConfig> {
    let config = load_resolved_with(path, env).await?;

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if !report.is_valid() {
        bail!("{} config error(s), first: {}", report.errors.len(), report.errors[0]);
    }

    Ok(config)
}

/// Load, substitute env vars, apply overrides and defaults, without validating.
pub async fn load_resolved_with(
    path: &Path,
    env: &HashMap<String, String>,
) -> Result<DocScanConfig> {
    let raw = load_config_value(path).await?;

    let value = resolve_env_vars_with(&raw, env).context("Failed to resolve env vars in config")?;

    let config: DocScanConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    Ok(apply_all_defaults(apply_env_overrides(config, env)))
}
