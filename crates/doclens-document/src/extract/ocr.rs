// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR capability — the seam between the extractor and whatever engine turns
// an image into text.
//
// Two engines ship with the crate:
//
// - `TesseractCli` shells out to the `tesseract` binary and honours the
//   configured language profile.
// - `OcrsRecognizer` (feature `ocr`) runs the pure-Rust `ocrs` engine.
//
// `UnavailableOcr` stands in when neither is configured.

use std::path::{Path, PathBuf};
use std::process::Command;

use doclens_core::LanguageProfile;
use doclens_core::error::{DoclensError, Result};
use tracing::{debug, instrument};

/// Turns an image file into text.
pub trait OcrCapability: Send + Sync {
    /// Recognise the text in `image_path` using `language`.
    fn recognize(&self, image_path: &Path, language: &LanguageProfile) -> Result<String>;

    /// Short engine name for logs.
    fn name(&self) -> &'static str;
}

/// OCR placeholder used when no engine is configured. Always errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableOcr;

impl OcrCapability for UnavailableOcr {
    fn recognize(&self, _image_path: &Path, _language: &LanguageProfile) -> Result<String> {
        Err(DoclensError::OcrUnavailable)
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}

/// OCR through the `tesseract` command-line tool.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    binary: PathBuf,
    tessdata_dir: Option<PathBuf>,
}

impl TesseractCli {
    /// Use `tesseract` from `PATH` with its default data directory.
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
            tessdata_dir: None,
        }
    }

    /// Point tesseract at a specific `tessdata` directory.
    pub fn with_tessdata_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tessdata_dir = Some(dir.into());
        self
    }

    /// Use a binary other than `tesseract` from `PATH`.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    fn command(&self, image_path: &Path, language: &LanguageProfile) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg(image_path)
            .arg("stdout")
            .args(["-l", language.as_str()]);
        if let Some(dir) = &self.tessdata_dir {
            cmd.arg("--tessdata-dir").arg(dir);
        }
        cmd
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrCapability for TesseractCli {
    #[instrument(skip_all, fields(path = %image_path.display(), language = %language))]
    fn recognize(&self, image_path: &Path, language: &LanguageProfile) -> Result<String> {
        let output = match self.command(image_path, language).output() {
            Ok(output) => output,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(DoclensError::OcrError(format!(
                    "{} not found (install tesseract-ocr)",
                    self.binary.display()
                )));
            }
            Err(err) => return Err(DoclensError::Io(err)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DoclensError::OcrError(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(char_count = text.chars().count(), "tesseract recognition complete");
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "tesseract"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_always_errors() {
        let err = UnavailableOcr
            .recognize(Path::new("scan.png"), &LanguageProfile::default())
            .unwrap_err();
        assert!(matches!(err, DoclensError::OcrUnavailable));
    }

    #[test]
    fn tesseract_command_carries_language_and_tessdata() {
        let ocr = TesseractCli::new().with_tessdata_dir("/srv/tessdata");
        let cmd = ocr.command(Path::new("id.png"), &LanguageProfile::default());
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            ["id.png", "stdout", "-l", "por", "--tessdata-dir", "/srv/tessdata"]
        );
    }

    #[test]
    fn missing_binary_is_ocr_error() {
        let ocr = TesseractCli::new().with_binary("/nonexistent/bin/tesseract-doclens");
        let result = ocr.recognize(Path::new("id.png"), &LanguageProfile::default());
        assert!(matches!(result, Err(DoclensError::OcrError(_))));
    }
}
