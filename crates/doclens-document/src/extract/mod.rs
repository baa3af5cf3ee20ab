// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text extraction — dispatches a file to OCR, PDF text, or a raw read based on
// its extension, and folds every failure into an empty outcome.

pub mod ocr;
#[cfg(feature = "ocr")]
pub mod ocrs_engine;
pub mod pdf;
pub mod raw;

use std::path::Path;
use std::sync::Arc;

use doclens_core::config::{AnalyzerConfig, OcrBackendKind, PdfBackendKind};
use doclens_core::{ExtractionOutcome, ExtractionSource, LanguageProfile};
use tracing::{debug, info, instrument, warn};

use crate::diagnostics::{Diagnostics, TracingDiagnostics};

pub use ocr::{OcrCapability, TesseractCli, UnavailableOcr};
pub use pdf::{LopdfText, PdfTextCapability, PlaceholderPdfText};
pub use raw::{FsTextReader, RawTextReader};

/// Extracts text from a document on disk.
///
/// Holds only shared, immutable capabilities: clone it freely across threads.
#[derive(Clone)]
pub struct TextExtractor {
    ocr: Arc<dyn OcrCapability>,
    pdf: Arc<dyn PdfTextCapability>,
    reader: Arc<dyn RawTextReader>,
    diagnostics: Arc<dyn Diagnostics>,
    language: LanguageProfile,
}

impl TextExtractor {
    /// Extractor with no OCR engine, the placeholder PDF capability, and the
    /// filesystem reader.
    pub fn new() -> Self {
        Self {
            ocr: Arc::new(UnavailableOcr),
            pdf: Arc::new(PlaceholderPdfText),
            reader: Arc::new(FsTextReader),
            diagnostics: Arc::new(TracingDiagnostics),
            language: LanguageProfile::default(),
        }
    }

    /// Wire capabilities according to `config`.
    ///
    /// An OCR backend that cannot be brought up is logged and replaced with
    /// [`UnavailableOcr`]; images then extract to empty text.
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        let ocr: Arc<dyn OcrCapability> = match &config.ocr_backend {
            OcrBackendKind::None => Arc::new(UnavailableOcr),
            OcrBackendKind::Tesseract { tessdata_dir } => {
                let mut tesseract = TesseractCli::new();
                if let Some(dir) = tessdata_dir {
                    tesseract = tesseract.with_tessdata_dir(dir);
                }
                Arc::new(tesseract)
            }
            OcrBackendKind::Ocrs { model_dir } => ocrs_backend(model_dir.as_deref()),
        };

        let pdf: Arc<dyn PdfTextCapability> = match config.pdf_backend {
            PdfBackendKind::Placeholder => Arc::new(PlaceholderPdfText),
            PdfBackendKind::Lopdf => Arc::new(LopdfText),
        };

        info!(ocr = ocr.name(), pdf = pdf.name(), language = %config.language_profile, "extractor configured");

        Self::new()
            .with_ocr(ocr)
            .with_pdf(pdf)
            .with_language(config.language_profile.clone())
    }

    pub fn with_ocr(mut self, ocr: Arc<dyn OcrCapability>) -> Self {
        self.ocr = ocr;
        self
    }

    pub fn with_pdf(mut self, pdf: Arc<dyn PdfTextCapability>) -> Self {
        self.pdf = pdf;
        self
    }

    pub fn with_reader(mut self, reader: Arc<dyn RawTextReader>) -> Self {
        self.reader = reader;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_language(mut self, language: LanguageProfile) -> Self {
        self.language = language;
        self
    }

    pub fn language(&self) -> &LanguageProfile {
        &self.language
    }

    /// Name of the wired OCR capability.
    pub fn ocr_name(&self) -> &'static str {
        self.ocr.name()
    }

    /// Extract text from `path`, choosing the capability by extension.
    ///
    /// Never fails: capability errors become [`ExtractionOutcome::Failed`].
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn extract(&self, path: &Path) -> ExtractionOutcome {
        let extension = path.extension().and_then(|e| e.to_str());
        let source = ExtractionSource::for_extension(extension);
        debug!(%source, "dispatching extraction");

        let result = match source {
            ExtractionSource::Ocr => self.ocr.recognize(path, &self.language),
            ExtractionSource::Pdf => self.pdf.extract_pdf_text(path),
            ExtractionSource::RawText => self.reader.read_all_text(path),
        };

        match result {
            Ok(text) => {
                let outcome = ExtractionOutcome::from_text(source, text);
                if !outcome.has_text() {
                    self.diagnostics.extraction_empty(path, source);
                }
                outcome
            }
            Err(err) => {
                let reason = err.to_string();
                self.diagnostics.extraction_failed(path, source, &reason);
                ExtractionOutcome::failed(source, reason)
            }
        }
    }

    /// Convenience wrapper returning only the text (`""` on failure).
    pub fn extract_text(&self, path: &Path) -> String {
        self.extract(path).into_text()
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "ocr")]
fn ocrs_backend(model_dir: Option<&Path>) -> Arc<dyn OcrCapability> {
    let loaded = match model_dir {
        Some(dir) => ocrs_engine::OcrsRecognizer::from_model_dir(dir),
        None => ocrs_engine::OcrsRecognizer::with_defaults(),
    };
    match loaded {
        Ok(engine) => Arc::new(engine),
        Err(err) => {
            warn!(error = %err, "ocrs backend unavailable, images will extract to empty text");
            Arc::new(UnavailableOcr)
        }
    }
}

#[cfg(not(feature = "ocr"))]
fn ocrs_backend(_model_dir: Option<&Path>) -> Arc<dyn OcrCapability> {
    warn!("ocrs backend requested but the `ocr` feature is disabled");
    Arc::new(UnavailableOcr)
}
