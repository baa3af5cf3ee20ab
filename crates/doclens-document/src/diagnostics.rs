// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Diagnostics sink for the extraction stage.

use std::path::Path;

use doclens_core::ExtractionSource;
use tracing::{debug, warn};

/// Receives non-fatal extraction events.
///
/// Extraction swallows every capability error; implementations decide where
/// those events end up. Calls must not block the pipeline.
pub trait Diagnostics: Send + Sync {
    /// A capability returned an error and the file degraded to empty text.
    fn extraction_failed(&self, path: &Path, source: ExtractionSource, reason: &str);

    /// A capability succeeded but produced no usable text.
    fn extraction_empty(&self, path: &Path, source: ExtractionSource) {
        let _ = (path, source);
    }
}

/// Default sink: forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn extraction_failed(&self, path: &Path, source: ExtractionSource, reason: &str) {
        warn!(path = %path.display(), %source, reason, "text extraction failed");
    }

    fn extraction_empty(&self, path: &Path, source: ExtractionSource) {
        debug!(path = %path.display(), %source, "text extraction produced no text");
    }
}
