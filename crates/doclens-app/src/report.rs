// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Caller-facing report shaped from an analysis result.

use chrono::{DateTime, Utc};
use doclens_core::AnalysisResult;
use serde::{Deserialize, Serialize};

/// One line of CLI output per analysed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub file_name: String,
    pub document_type: String,
    pub readability_score: u8,
    pub is_readable: bool,
    pub classification_confidence: u8,
    /// Leading slice of the extracted text.
    pub extracted_text_preview: String,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisReport {
    pub fn from_result(result: &AnalysisResult, preview_chars: usize) -> Self {
        Self {
            success: true,
            error_message: None,
            file_name: result.file_name().to_string(),
            document_type: result.document_type().to_string(),
            readability_score: result.readability_score(),
            is_readable: result.is_readable(),
            classification_confidence: result.classification_confidence(),
            extracted_text_preview: truncate_text(result.extracted_text(), preview_chars),
            analyzed_at: Utc::now(),
        }
    }

    pub fn error(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
            file_name: file_name.into(),
            document_type: String::new(),
            readability_score: 0,
            is_readable: false,
            classification_confidence: 0,
            extracted_text_preview: String::new(),
            analyzed_at: Utc::now(),
        }
    }
}

/// Keep the first `max_chars` characters, marking the cut with `...`.
fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
