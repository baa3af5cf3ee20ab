// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pure-Rust OCR backed by the `ocrs` crate, with neural network models
// executed via `rten`.
//
// # Feature Gate
//
// Only compiled with the `ocr` feature:
//
// ```toml
// doclens-document = { path = "crates/doclens-document", features = ["ocr"] }
// ```
//
// # Model Setup
//
// Two model files are required in the model directory:
//
// - `text-detection.rten` — locates text regions in the image.
// - `text-recognition.rten` — decodes characters from detected regions.
//
// Running `ocrs-cli` once downloads both into `$XDG_CACHE_HOME/ocrs`
// (typically `~/.cache/ocrs`), which is the default model directory.
//
// ocrs recognises Latin script only; the configured language profile is
// recorded in the span but does not change recognition.

use std::path::{Path, PathBuf};

use doclens_core::LanguageProfile;
use doclens_core::error::{DoclensError, Result};
use ocrs::{ImageSource, OcrEngine, OcrEngineParams};
use rten::Model;
use tracing::{debug, info, instrument};

use super::ocr::OcrCapability;

const DETECTION_MODEL_FILENAME: &str = "text-detection.rten";
const RECOGNITION_MODEL_FILENAME: &str = "text-recognition.rten";

/// `$XDG_CACHE_HOME/ocrs`, falling back to `~/.cache/ocrs`.
pub fn default_model_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
        PathBuf::from(xdg).join("ocrs")
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".cache").join("ocrs")
    } else {
        PathBuf::from("ocrs-models")
    }
}

/// OCR engine holding loaded detection and recognition models.
///
/// Model loading is the expensive step; build one recognizer and share it
/// across analyses.
pub struct OcrsRecognizer {
    engine: OcrEngine,
}

impl OcrsRecognizer {
    /// Load both models from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`DoclensError::OcrError`] if a model file is missing or corrupt.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn from_model_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let detection_path = dir.join(DETECTION_MODEL_FILENAME);
        let recognition_path = dir.join(RECOGNITION_MODEL_FILENAME);

        info!("Loading OCR detection model");
        let detection_model = load_model(&detection_path)?;
        info!("Loading OCR recognition model");
        let recognition_model = load_model(&recognition_path)?;

        let engine = OcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })
        .map_err(|err| DoclensError::OcrError(format!("failed to initialise OCR engine: {}", err)))?;

        info!("OCR engine initialised");
        Ok(Self { engine })
    }

    /// Load models from [`default_model_dir`].
    pub fn with_defaults() -> Result<Self> {
        Self::from_model_dir(default_model_dir())
    }
}

fn load_model(path: &Path) -> Result<Model> {
    if !path.exists() {
        return Err(DoclensError::OcrError(format!(
            "model not found at {}; run `ocrs-cli` once to download models",
            path.display()
        )));
    }
    Model::load_file(path).map_err(|err| {
        DoclensError::OcrError(format!("failed to load model from {}: {}", path.display(), err))
    })
}

impl OcrCapability for OcrsRecognizer {
    #[instrument(skip_all, fields(path = %image_path.display(), language = %language))]
    fn recognize(&self, image_path: &Path, language: &LanguageProfile) -> Result<String> {
        let image = image::open(image_path).map_err(|err| {
            DoclensError::OcrError(format!("cannot decode {}: {}", image_path.display(), err))
        })?;

        // ocrs expects RGB8.
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();

        let source = ImageSource::from_bytes(rgb.as_raw(), (width, height)).map_err(|err| {
            DoclensError::OcrError(format!(
                "failed to create image source ({}x{}): {}",
                width, height, err
            ))
        })?;

        let input = self
            .engine
            .prepare_input(source)
            .map_err(|err| DoclensError::OcrError(format!("OCR preprocessing failed: {}", err)))?;

        let text = self
            .engine
            .get_text(&input)
            .map_err(|err| DoclensError::OcrError(format!("OCR text recognition failed: {}", err)))?;

        debug!(
            line_count = text.lines().count(),
            char_count = text.chars().count(),
            "OCR recognition complete"
        );
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "ocrs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_dir_ends_in_ocrs() {
        let dir = default_model_dir();
        let name = dir.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name == "ocrs" || name == "ocrs-models", "unexpected model dir {dir:?}");
    }

    #[test]
    fn missing_models_fail_to_load() {
        let result = OcrsRecognizer::from_model_dir("/nonexistent/path/ocr-models");
        assert!(matches!(result, Err(DoclensError::OcrError(_))));
    }
}
