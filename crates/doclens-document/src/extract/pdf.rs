// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF text capability — placeholder by default, `lopdf` text layer on request.

use std::path::Path;

use doclens_core::error::{DoclensError, Result};
use lopdf::Document;
use tracing::{debug, instrument};

/// Text returned by [`PlaceholderPdfText`] for every PDF.
pub const PDF_PLACEHOLDER_TEXT: &str = "Texto extraído do PDF (simulação)";

/// Pulls the text content out of a PDF file.
pub trait PdfTextCapability: Send + Sync {
    fn extract_pdf_text(&self, path: &Path) -> Result<String>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

/// Deterministic stand-in that never reads the file.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderPdfText;

impl PdfTextCapability for PlaceholderPdfText {
    fn extract_pdf_text(&self, _path: &Path) -> Result<String> {
        Ok(PDF_PLACEHOLDER_TEXT.to_string())
    }

    fn name(&self) -> &'static str {
        "placeholder"
    }
}

/// Reads the embedded text layer of every page with `lopdf`.
///
/// Scanned PDFs without a text layer come back blank.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfText;

impl PdfTextCapability for LopdfText {
    #[instrument(skip_all, fields(path = %path.display()))]
    fn extract_pdf_text(&self, path: &Path) -> Result<String> {
        let document = Document::load(path).map_err(|err| {
            DoclensError::PdfError(format!("failed to open {}: {}", path.display(), err))
        })?;

        if document.is_encrypted() {
            return Err(DoclensError::UnsupportedDocument(format!(
                "{} is encrypted",
                path.display()
            )));
        }

        // lopdf pages are keyed by 1-indexed page number.
        let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
        let text = document.extract_text(&page_numbers).map_err(|err| {
            DoclensError::PdfError(format!(
                "failed to extract text from {}: {}",
                path.display(),
                err
            ))
        })?;

        debug!(pages = page_numbers.len(), char_count = text.chars().count(), "PDF text extracted");
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "lopdf"
    }
}
