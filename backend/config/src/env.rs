//! Environment handling for config values.
//!
//! Two mechanisms:
//! - `${VAR_NAME}` substitution inside string values (`$${VAR}` keeps a literal `${VAR}`);
//! - well-known variables such as `STORAGE_TYPE` that override config fields.

use anyhow::{bail, Result};
use docscan_core::StorageType;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::schema::{DocScanConfig, LoggingConfig, StorageConfig};

/// `${VAR}` with an optional leading `$` marking an escape.
static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

/// Variables that override individual config fields.
pub const STORAGE_TYPE_VAR: &str = "STORAGE_TYPE";
pub const STORAGE_ROOT_VAR: &str = "DOCSCAN_STORAGE_ROOT";
pub const TEMP_DIR_VAR: &str = "DOCSCAN_TEMP_DIR";
pub const BUCKET_VAR: &str = "DOCSCAN_BUCKET";
pub const ENDPOINT_VAR: &str = "DOCSCAN_ENDPOINT";
pub const MOUNT_DIR_VAR: &str = "DOCSCAN_MOUNT_DIR";
pub const LOG_LEVEL_VAR: &str = "DOCSCAN_LOG_LEVEL";

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Snapshot of the process environment.
pub fn process_env() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Substitute `${VAR}` references in every string leaf of `value`.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    Ok(match value {
        Value::String(s) => Value::String(substitute_string(s, env, path)?),
        Value::Array(arr) => Value::Array(
            arr.iter()
                .enumerate()
                .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
                .collect::<Result<_>>()?,
        ),
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                let child = if path.is_empty() { k.clone() } else { format!("{path}.{k}") };
                out.insert(k.clone(), substitute_value(v, env, &child)?);
            }
            Value::Object(out)
        }
        other => other.clone(),
    })
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains("${") {
        return Ok(s.to_string());
    }

    let mut out = String::with_capacity(s.len());
    let mut last = 0;
    for caps in ENV_VAR_PATTERN.captures_iter(s) {
        let whole = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
        out.push_str(&s[last..whole.start]);
        last = whole.end;

        let name = &caps[2];
        if !caps[1].is_empty() {
            out.push_str(&format!("${{{name}}}"));
            continue;
        }
        match env.get(name) {
            Some(val) if !val.is_empty() => out.push_str(val),
            _ => bail!(MissingEnvVarError {
                var_name: name.to_string(),
                config_path: path.to_string(),
            }),
        }
    }
    out.push_str(&s[last..]);
    Ok(out)
}

/// Apply well-known environment overrides on top of a loaded config.
pub fn apply_env_overrides(mut config: DocScanConfig, env: &HashMap<String, String>) -> DocScanConfig {
    let get = |key: &str| env.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

    let storage = config.storage.get_or_insert_with(StorageConfig::default);
    if let Some(v) = get(STORAGE_TYPE_VAR) {
        storage.storage_type = Some(StorageType::parse_or_default(v));
    }
    if let Some(v) = get(STORAGE_ROOT_VAR) {
        storage.root = Some(PathBuf::from(v));
    }
    if let Some(v) = get(TEMP_DIR_VAR) {
        storage.temp_dir = Some(PathBuf::from(v));
    }
    if let Some(v) = get(BUCKET_VAR) {
        storage.bucket = Some(v.to_string());
    }
    if let Some(v) = get(ENDPOINT_VAR) {
        storage.endpoint = Some(v.to_string());
    }
    if let Some(v) = get(MOUNT_DIR_VAR) {
        storage.mount_dir = Some(PathBuf::from(v));
    }

    if let Some(v) = get(LOG_LEVEL_VAR) {
        config
            .logging
            .get_or_insert_with(LoggingConfig::default)
            .level = Some(v.to_string());
    }
    config
}
