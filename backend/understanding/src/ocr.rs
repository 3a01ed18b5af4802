//! Optical Character Recognition (OCR)
//!
//! A recognizer turns one decoded image into text fragments in reading
//! order. Recognizers are built once and shared between scans.

use std::io::{Cursor, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use image::{DynamicImage, ImageFormat};
use tracing::{debug, info};

/// Engine that reads text out of an in-memory image.
pub trait TextRecognizer: Send + Sync {
    /// Engine identifier, used in logs.
    fn name(&self) -> &str;

    /// Recognize `image`, returning fragments in reading order.
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<String>>;
}

/// Map a two-letter language code to the Tesseract traineddata name.
///
/// Codes that are already Tesseract names pass through unchanged.
pub fn tesseract_language(code: &str) -> String {
    let code = code.trim().to_lowercase();
    let mapped = match code.as_str() {
        "en" => "eng",
        "de" => "deu",
        "fr" => "fra",
        "es" => "spa",
        "it" => "ita",
        "pt" => "por",
        "nl" => "nld",
        "pl" => "pol",
        "ru" => "rus",
        "ja" => "jpn",
        "ko" => "kor",
        "ch_sim" | "zh" => "chi_sim",
        "ch_tra" => "chi_tra",
        other => other,
    };
    mapped.to_string()
}

/// Recognizer backed by the `tesseract` command-line program.
///
/// The image is encoded as PNG and streamed over stdin; every non-empty
/// output line becomes one fragment.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    binary: PathBuf,
    languages: Vec<String>,
}

impl TesseractRecognizer {
    pub fn new(binary: impl Into<PathBuf>, languages: &[String]) -> Self {
        Self {
            binary: binary.into(),
            languages: languages.iter().map(|l| tesseract_language(l)).collect(),
        }
    }

    /// The value passed to `-l`, e.g. `eng+deu`.
    pub fn language_arg(&self) -> String {
        self.languages.join("+")
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new("tesseract", &["en".to_string(), "de".to_string()])
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<Vec<String>> {
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .context("encode image for tesseract")?;

        info!(
            width = image.width(),
            height = image.height(),
            languages = %self.language_arg(),
            "Running OCR detection on image"
        );

        let mut child = Command::new(&self.binary)
            .args(["stdin", "stdout", "-l"])
            .arg(self.language_arg())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("spawn {}", self.binary.display()))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&png).context("write image to tesseract")?;
        }

        let output = child.wait_with_output().context("wait for tesseract")?;
        if !output.status.success() {
            bail!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let fragments = split_fragments(&String::from_utf8_lossy(&output.stdout));
        debug!(fragments = fragments.len(), "OCR finished");
        Ok(fragments)
    }
}

fn split_fragments(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(|line| line.trim_matches(|c: char| c.is_whitespace() || c == '\u{c}'))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
