// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// doclens-document — The document analysis pipeline.
//
// Extracts text from images (OCR), PDFs, and plain files; classifies the text
// into a fixed set of document types; scores how readable it is; and composes
// the three into a single analysis result.

pub mod analyzer;
pub mod classify;
pub mod diagnostics;
pub mod extract;
pub mod readability;

// Re-export the primary structs so callers can use `doclens_document::DocumentAnalyzer` etc.
pub use analyzer::DocumentAnalyzer;
pub use classify::{Classification, Classifier};
pub use diagnostics::{Diagnostics, TracingDiagnostics};
pub use extract::TextExtractor;
pub use readability::ReadabilityScorer;

#[cfg(feature = "ocr")]
pub use extract::ocrs_engine::OcrsRecognizer;
