// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Analyzer configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{DoclensError, Result};

/// Default OCR language profile (Portuguese).
pub const DEFAULT_LANGUAGE_PROFILE: &str = "por";

/// Single language profile handed to the OCR capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageProfile(pub String);

impl LanguageProfile {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageProfile {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGE_PROFILE.to_string())
    }
}

impl std::fmt::Display for LanguageProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which OCR capability to wire into the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OcrBackendKind {
    /// No OCR: every image extracts to empty text.
    None,
    /// The `tesseract` command-line binary. A missing binary makes image
    /// extraction fail, which still yields empty text.
    Tesseract {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tessdata_dir: Option<PathBuf>,
    },
    /// The pure-Rust `ocrs` engine (requires the `ocr` feature).
    Ocrs {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model_dir: Option<PathBuf>,
    },
}

impl Default for OcrBackendKind {
    fn default() -> Self {
        Self::Tesseract { tessdata_dir: None }
    }
}

/// Which PDF text capability to wire into the extractor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PdfBackendKind {
    /// Deterministic placeholder text.
    #[default]
    Placeholder,
    /// Text layer extraction through `lopdf`.
    Lopdf,
}

/// Settings for the analysis pipeline and its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Language profile passed to OCR.
    pub language_profile: LanguageProfile,
    /// OCR capability selection.
    pub ocr_backend: OcrBackendKind,
    /// PDF text capability selection.
    pub pdf_backend: PdfBackendKind,
    /// Where uploaded bytes are persisted before analysis.
    pub upload_dir: PathBuf,
    /// Upper bound on a single analysis, enforced by the host.
    pub analysis_timeout_secs: u64,
    /// Characters of extracted text kept in report previews.
    pub preview_chars: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            language_profile: LanguageProfile::default(),
            ocr_backend: OcrBackendKind::default(),
            pdf_backend: PdfBackendKind::Placeholder,
            upload_dir: std::env::temp_dir().join("doclens-uploads"),
            analysis_timeout_secs: 60,
            preview_chars: 200,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from a JSON file.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(err) => return Err(DoclensError::Io(err)),
        };

        let config: Self = serde_json::from_str(&data).map_err(|err| {
            DoclensError::Config(format!("{}: {}", path.display(), err))
        })?;
        config.validate()?;

        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Write configuration as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.language_profile.as_str().trim().is_empty() {
            return Err(DoclensError::Config("language_profile must not be empty".into()));
        }
        if self.analysis_timeout_secs == 0 {
            return Err(DoclensError::Config(
                "analysis_timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
