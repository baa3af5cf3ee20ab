// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Analysis orchestration — extract once, then classify and score that text.

use std::path::Path;
use std::sync::Arc;

use doclens_core::config::AnalyzerConfig;
use doclens_core::{AnalysisResult, DocumentType};
use tracing::{debug, info, instrument};

use crate::classify::Classifier;
use crate::diagnostics::Diagnostics;
use crate::extract::{OcrCapability, PdfTextCapability, RawTextReader, TextExtractor};
use crate::readability::ReadabilityScorer;

/// Confidence reported when a document type was assigned.
pub const CONFIDENCE_CLASSIFIED: u8 = 85;
/// Confidence reported for [`DocumentType::Unknown`].
pub const CONFIDENCE_UNKNOWN: u8 = 30;

/// Fixed confidence for a classification outcome.
pub fn confidence_for(document_type: DocumentType) -> u8 {
    if document_type == DocumentType::Unknown {
        CONFIDENCE_UNKNOWN
    } else {
        CONFIDENCE_CLASSIFIED
    }
}

/// Runs the full pipeline over one file at a time.
///
/// Stateless between calls; clone it into as many threads as needed. The
/// analyzer never deletes or otherwise manages the file it reads.
#[derive(Clone, Default)]
pub struct DocumentAnalyzer {
    extractor: TextExtractor,
    classifier: Classifier,
    scorer: ReadabilityScorer,
}

impl DocumentAnalyzer {
    pub fn new(extractor: TextExtractor) -> Self {
        Self {
            extractor,
            classifier: Classifier::new(),
            scorer: ReadabilityScorer::new(),
        }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(TextExtractor::from_config(config))
    }

    pub fn with_ocr(mut self, ocr: Arc<dyn OcrCapability>) -> Self {
        self.extractor = self.extractor.with_ocr(ocr);
        self
    }

    pub fn with_pdf(mut self, pdf: Arc<dyn PdfTextCapability>) -> Self {
        self.extractor = self.extractor.with_pdf(pdf);
        self
    }

    pub fn with_reader(mut self, reader: Arc<dyn RawTextReader>) -> Self {
        self.extractor = self.extractor.with_reader(reader);
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.extractor = self.extractor.with_diagnostics(diagnostics);
        self
    }

    pub fn extractor(&self) -> &TextExtractor {
        &self.extractor
    }

    /// Analyse the document at `path`, reporting it under `file_name`.
    #[instrument(skip_all, fields(path = %path.display(), file_name = %file_name))]
    pub fn analyze(&self, path: &Path, file_name: &str) -> AnalysisResult {
        let outcome = self.extractor.extract(path);
        let text = outcome.into_text();
        let extension = path.extension().and_then(|e| e.to_str());

        let classification = self.classifier.explain(&text, extension);
        debug!(
            document_type = %classification.document_type,
            matched_keywords = ?classification.matched_keywords,
            matched_postal_code = classification.matched_postal_code,
            "document classified"
        );

        let readability_score = self.scorer.score(&text);
        let confidence = confidence_for(classification.document_type);

        info!(
            document_type = %classification.document_type,
            readability_score,
            confidence,
            "analysis complete"
        );

        AnalysisResult::new(
            file_name,
            classification.document_type,
            readability_score,
            text,
            confidence,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::testing::{Event, RecordingDiagnostics};
    use crate::extract::testing::FixedOcr;

    fn analyzer_with_ocr(ocr: FixedOcr) -> DocumentAnalyzer {
        DocumentAnalyzer::default().with_ocr(Arc::new(ocr))
    }

    #[test]
    fn identity_card_image() {
        let analyzer =
            analyzer_with_ocr(FixedOcr::returning("CARTEIRA NACIONAL DE HABILITAÇÃO Nome: João"));
        let result = analyzer.analyze(Path::new("/uploads/abc_id.png"), "id.png");

        assert_eq!(result.file_name(), "id.png");
        assert_eq!(result.document_type(), DocumentType::Identity);
        assert_eq!(result.readability_score(), 50);
        assert_eq!(result.classification_confidence(), 85);
        assert!(!result.is_readable());
        assert_eq!(
            result.extracted_text(),
            "CARTEIRA NACIONAL DE HABILITAÇÃO Nome: João"
        );
    }

    #[test]
    fn blank_image_is_photo() {
        let analyzer = analyzer_with_ocr(FixedOcr::returning(""));
        let result = analyzer.analyze(Path::new("blank.png"), "blank.png");

        assert_eq!(result.document_type(), DocumentType::Photo);
        assert_eq!(result.readability_score(), 10);
        assert_eq!(result.classification_confidence(), CONFIDENCE_CLASSIFIED);
        assert_eq!(result.extracted_text(), "");
    }

    #[test]
    fn failed_ocr_still_yields_a_result() {
        let diag = Arc::new(RecordingDiagnostics::default());
        let analyzer = analyzer_with_ocr(FixedOcr::failing()).with_diagnostics(diag.clone());
        let result = analyzer.analyze(Path::new("corrupt.jpg"), "corrupt.jpg");

        assert_eq!(result.document_type(), DocumentType::Photo);
        assert_eq!(result.readability_score(), 10);
        assert!(matches!(diag.events().as_slice(), [Event::Failed(..)]));
    }

    #[test]
    fn invoice_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "Nota Fiscal NF-e valor total R$100").unwrap();

        let result = DocumentAnalyzer::default().analyze(&path, "note.txt");
        assert_eq!(result.document_type(), DocumentType::Invoice);
        assert_eq!(result.classification_confidence(), 85);
        assert_eq!(result.readability_score(), 50);
        // The analyzer leaves the file in place.
        assert!(path.exists());
    }

    #[test]
    fn unreadable_text_file_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, [0xc3u8, 0x28, 0xa0, 0xa1]).unwrap();

        let result = DocumentAnalyzer::default().analyze(&path, "blob.bin");
        assert_eq!(result.document_type(), DocumentType::Unknown);
        assert_eq!(result.classification_confidence(), 30);
        assert_eq!(result.readability_score(), 10);
        assert_eq!(result.extracted_text(), "");
    }

    #[test]
    fn placeholder_pdf_is_unknown() {
        let result = DocumentAnalyzer::default().analyze(Path::new("contrato.pdf"), "contrato.pdf");
        assert_eq!(result.document_type(), DocumentType::Unknown);
        assert_eq!(result.classification_confidence(), 30);
        assert_eq!(result.readability_score(), 50);
    }

    #[test]
    fn long_clean_text_is_readable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carta.txt");
        let body = vec!["palavra"; 120].join(" ");
        std::fs::write(&path, &body).unwrap();

        let result = DocumentAnalyzer::default().analyze(&path, "carta.txt");
        assert_eq!(result.readability_score(), 62);
        assert!(result.is_readable());
    }

    #[test]
    fn analyzer_is_shareable_across_threads() {
        let analyzer = Arc::new(analyzer_with_ocr(FixedOcr::returning("Fatura de água")));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let analyzer = Arc::clone(&analyzer);
                std::thread::spawn(move || {
                    analyzer
                        .analyze(Path::new(&format!("conta{i}.png")), "conta.png")
                        .document_type()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), DocumentType::AddressProof);
        }
    }

    #[test]
    fn confidence_is_fixed() {
        for document_type in DocumentType::ALL {
            let expected = if document_type == DocumentType::Unknown { 30 } else { 85 };
            assert_eq!(confidence_for(document_type), expected);
        }
    }
}
