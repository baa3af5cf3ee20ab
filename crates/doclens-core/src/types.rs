// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for document analysis.

use serde::{Deserialize, Serialize};

/// Score above which a document counts as readable.
pub const READABLE_THRESHOLD: u8 = 50;

/// Image file extensions routed to OCR (lowercase, no leading dot).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "gif"];

/// Normalise a file extension: strip one leading dot and lowercase.
pub fn normalize_extension(ext: &str) -> String {
    ext.strip_prefix('.').unwrap_or(ext).to_lowercase()
}

/// Whether `ext` (with or without leading dot, any case) is an image type.
pub fn is_image_extension(ext: &str) -> bool {
    let ext = normalize_extension(ext);
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Document categories the classifier can assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocumentType {
    #[default]
    Unknown,
    /// Identity documents (RG, CNH, passport, ...).
    Identity,
    /// Images carrying no recognisable text.
    Photo,
    /// Invoices and fiscal notes.
    Invoice,
    /// Utility bills and other proofs of residence.
    AddressProof,
    /// Any other document type.
    Other,
}

impl DocumentType {
    /// Every variant, in declaration order.
    pub const ALL: [DocumentType; 6] = [
        Self::Unknown,
        Self::Identity,
        Self::Photo,
        Self::Invoice,
        Self::AddressProof,
        Self::Other,
    ];

    /// Stable numeric code used by downstream consumers.
    pub fn code(&self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Identity => 1,
            Self::Photo => 2,
            Self::Invoice => 3,
            Self::AddressProof => 4,
            Self::Other => 99,
        }
    }

    /// Variant name as rendered in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Identity => "Identity",
            Self::Photo => "Photo",
            Self::Invoice => "Invoice",
            Self::AddressProof => "AddressProof",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which capability produced an [`ExtractionOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionSource {
    /// Optical character recognition over an image file.
    Ocr,
    /// PDF text layer.
    Pdf,
    /// Plain read of the file as UTF-8 text.
    RawText,
}

impl ExtractionSource {
    /// Pick the source for a file extension (with or without leading dot).
    pub fn for_extension(ext: Option<&str>) -> Self {
        match ext.map(normalize_extension).as_deref() {
            Some(e) if IMAGE_EXTENSIONS.contains(&e) => Self::Ocr,
            Some("pdf") => Self::Pdf,
            _ => Self::RawText,
        }
    }
}

impl std::fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Ocr => "ocr",
            Self::Pdf => "pdf",
            Self::RawText => "raw_text",
        })
    }
}

/// Result of running text extraction on one file.
///
/// Extraction never fails from the caller's point of view: a capability
/// error is carried as [`ExtractionOutcome::Failed`] and reads as empty text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// The capability produced non-blank text.
    Text {
        source: ExtractionSource,
        text: String,
    },
    /// The capability succeeded but produced only whitespace (or nothing).
    Empty {
        source: ExtractionSource,
        text: String,
    },
    /// The capability errored; no text is available.
    Failed {
        source: ExtractionSource,
        reason: String,
    },
}

impl ExtractionOutcome {
    /// Wrap capability output, separating blank text from real text.
    pub fn from_text(source: ExtractionSource, text: String) -> Self {
        if text.trim().is_empty() {
            Self::Empty { source, text }
        } else {
            Self::Text { source, text }
        }
    }

    pub fn failed(source: ExtractionSource, reason: impl Into<String>) -> Self {
        Self::Failed {
            source,
            reason: reason.into(),
        }
    }

    pub fn source(&self) -> ExtractionSource {
        match self {
            Self::Text { source, .. } | Self::Empty { source, .. } | Self::Failed { source, .. } => {
                *source
            }
        }
    }

    /// Extracted text; `""` when extraction failed.
    pub fn text(&self) -> &str {
        match self {
            Self::Text { text, .. } | Self::Empty { text, .. } => text,
            Self::Failed { .. } => "",
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Text { text, .. } | Self::Empty { text, .. } => text,
            Self::Failed { .. } => String::new(),
        }
    }

    pub fn has_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Outcome of analysing one document.
///
/// Built once by the analyzer and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    file_name: String,
    document_type: DocumentType,
    readability_score: u8,
    extracted_text: String,
    classification_confidence: u8,
}

impl AnalysisResult {
    /// Assemble a result. Score and confidence are clamped to 100.
    pub fn new(
        file_name: impl Into<String>,
        document_type: DocumentType,
        readability_score: u8,
        extracted_text: String,
        classification_confidence: u8,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            document_type,
            readability_score: readability_score.min(100),
            extracted_text,
            classification_confidence: classification_confidence.min(100),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    /// Readability score, 0-100.
    pub fn readability_score(&self) -> u8 {
        self.readability_score
    }

    pub fn extracted_text(&self) -> &str {
        &self.extracted_text
    }

    /// Classification confidence, 0-100.
    pub fn classification_confidence(&self) -> u8 {
        self.classification_confidence
    }

    /// True when the readability score is above [`READABLE_THRESHOLD`].
    pub fn is_readable(&self) -> bool {
        self.readability_score > READABLE_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_normalisation() {
        assert_eq!(normalize_extension(".PNG"), "png");
        assert_eq!(normalize_extension("Jpeg"), "jpeg");
        assert!(is_image_extension(".TIFF"));
        assert!(is_image_extension("gif"));
        assert!(!is_image_extension("tif"));
        assert!(!is_image_extension(".pdf"));
    }

    #[test]
    fn extraction_source_dispatch() {
        assert_eq!(ExtractionSource::for_extension(Some("JPG")), ExtractionSource::Ocr);
        assert_eq!(ExtractionSource::for_extension(Some(".pdf")), ExtractionSource::Pdf);
        assert_eq!(ExtractionSource::for_extension(Some("txt")), ExtractionSource::RawText);
        assert_eq!(ExtractionSource::for_extension(None), ExtractionSource::RawText);
    }

    #[test]
    fn blank_text_is_empty_outcome() {
        let outcome = ExtractionOutcome::from_text(ExtractionSource::Ocr, " \n\t".into());
        assert!(matches!(outcome, ExtractionOutcome::Empty { .. }));
        assert!(!outcome.has_text());
        assert_eq!(outcome.text(), " \n\t");
    }

    #[test]
    fn failed_outcome_reads_as_empty() {
        let outcome = ExtractionOutcome::failed(ExtractionSource::RawText, "permission denied");
        assert!(outcome.is_failure());
        assert_eq!(outcome.text(), "");
        assert_eq!(outcome.source(), ExtractionSource::RawText);
        assert_eq!(outcome.into_text(), "");
    }

    #[test]
    fn result_readability_threshold() {
        let at = AnalysisResult::new("a.txt", DocumentType::Unknown, 50, String::new(), 30);
        let above = AnalysisResult::new("a.txt", DocumentType::Unknown, 51, String::new(), 30);
        assert!(!at.is_readable());
        assert!(above.is_readable());
    }

    #[test]
    fn result_clamps_to_100() {
        let result = AnalysisResult::new("a.txt", DocumentType::Invoice, 250, String::new(), 200);
        assert_eq!(result.readability_score(), 100);
        assert_eq!(result.classification_confidence(), 100);
    }

    #[test]
    fn document_type_codes_and_names() {
        assert_eq!(DocumentType::Other.code(), 99);
        assert_eq!(DocumentType::AddressProof.code(), 4);
        assert_eq!(DocumentType::AddressProof.to_string(), "AddressProof");
        assert_eq!(DocumentType::default(), DocumentType::Unknown);
        let json = serde_json::to_string(&DocumentType::Identity).unwrap();
        assert_eq!(json, "\"Identity\"");
    }
}
