// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raw file reader — fallback for anything that is neither image nor PDF.

use std::path::Path;

use doclens_core::error::Result;

/// Reads a whole file as text.
pub trait RawTextReader: Send + Sync {
    fn read_all_text(&self, path: &Path) -> Result<String>;
}

const UTF8_BOM: char = '\u{feff}';

/// Reads from the local filesystem. Non-UTF-8 content is an error; a leading
/// byte-order mark is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsTextReader;

impl RawTextReader for FsTextReader {
    fn read_all_text(&self, path: &Path) -> Result<String> {
        let text = std::fs::read_to_string(path)?;
        Ok(match text.strip_prefix(UTF8_BOM) {
            Some(rest) => rest.to_string(),
            None => text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "endereço: Rua das Flores").unwrap();
        assert_eq!(FsTextReader.read_all_text(&path).unwrap(), "endereço: Rua das Flores");
    }

    #[test]
    fn byte_order_mark_is_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.txt");
        std::fs::write(&path, "\u{feff}Nota Fiscal \u{feff}").unwrap();
        assert_eq!(FsTextReader.read_all_text(&path).unwrap(), "Nota Fiscal \u{feff}");
    }

    #[test]
    fn binary_content_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, [0xffu8, 0xfe, 0x00, 0xc3, 0x28]).unwrap();
        assert!(FsTextReader.read_all_text(&path).is_err());
    }
}
