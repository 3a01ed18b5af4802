//! CLI Doctor Command
//!
//! Checks that the config loads cleanly and the OCR engines are installed.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::Command;

use docscan_config::{load_resolved_with, process_env, validate};
use docscan_core::StorageType;

/// Executes the full doctor diagnosis.
pub async fn run(config_path: &Path) -> Result<()> {
    println!("\n🔍 Running DocScan Doctor...\n");

    let config = load_resolved_with(config_path, &process_env()).await?;

    let config_ok = check_config(config_path, &config);
    let ocr = config.ocr.clone().unwrap_or_default();
    let engines_ok = check_binary(
        "tesseract",
        ocr.tesseract_bin.unwrap_or_else(|| PathBuf::from("tesseract")),
        "--version",
    ) & check_binary(
        "pdftoppm",
        ocr.pdftoppm_bin.unwrap_or_else(|| PathBuf::from("pdftoppm")),
        "-v",
    );

    println!();
    if config_ok && engines_ok {
        println!("✅ All checks passed! DocScan is ready.");
    } else {
        println!("❌ Some checks failed! Please fix the errors above.");
    }

    Ok(())
}

fn check_config(path: &Path, config: &docscan_config::DocScanConfig) -> bool {
    println!("Checking Configuration ({}):", path.display());
    println!("  🔹 storage backend: {}", config.storage_type());

    let report = validate(config);
    for warning in &report.warnings {
        println!("  🟡 {}: {}", warning.path, warning.message);
    }
    for error in &report.errors {
        println!("  🔴 {}: {}", error.path, error.message);
    }

    if config.storage_type() == StorageType::S3 {
        let temp = config.storage.as_ref().and_then(|s| s.temp_dir.clone());
        if let Some(temp) = temp {
            if temp.is_dir() {
                println!("  🟢 temp dir {} exists", temp.display());
            } else {
                println!("  🔴 temp dir {} is missing", temp.display());
                return false;
            }
        }
    }

    if report.is_valid() {
        println!("  🟢 config is valid");
    }
    report.is_valid()
}

fn check_binary(label: &str, binary: PathBuf, version_flag: &str) -> bool {
    println!("\nChecking {label}:");
    match Command::new(&binary).arg(version_flag).output() {
        Ok(output) => {
            // pdftoppm prints its version on stderr.
            let raw = if output.stdout.is_empty() { &output.stderr } else { &output.stdout };
            let first_line = String::from_utf8_lossy(raw)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string();
            if output.status.success() {
                println!("  🟢 {} ({first_line})", binary.display());
                true
            } else {
                println!("  🔴 {} exited with {} ({first_line})", binary.display(), output.status);
                false
            }
        }
        Err(e) => {
            println!("  🔴 {} not runnable: {e}", binary.display());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_fails_check() {
        assert!(!check_binary("ghost", PathBuf::from("/nonexistent/docscan-ghost"), "-v"));
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_fails_check() {
        assert!(!check_binary("false", PathBuf::from("false"), "--version"));
        assert!(check_binary("true", PathBuf::from("true"), "--version"));
    }
}
