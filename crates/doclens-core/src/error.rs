// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for doclens.

use thiserror::Error;

/// Top-level error type for all doclens operations.
///
/// The analysis pipeline itself never surfaces these to its callers: text
/// extraction folds every failure into an empty outcome. They travel between
/// the extraction capabilities and the extractor, and between the CLI host and
/// its configuration / input handling.
#[derive(Debug, Error)]
pub enum DoclensError {
    // -- Extraction capabilities --
    #[error("OCR failed: {0}")]
    OcrError(String),

    #[error("no OCR backend configured")]
    OcrUnavailable,

    #[error("PDF text extraction failed: {0}")]
    PdfError(String),

    #[error("unsupported document: {0}")]
    UnsupportedDocument(String),

    // -- Host --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("analysis timed out after {0}s")]
    Timeout(u64),

    #[error("analysis task failed: {0}")]
    Task(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DoclensError>;
