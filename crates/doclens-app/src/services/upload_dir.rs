// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Upload directory handling for bytes received on stdin.

use std::path::{Path, PathBuf};

use doclens_core::error::{DoclensError, Result};
use uuid::Uuid;

/// Create `dir` if needed and return it.
pub fn ensure(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    Ok(dir.to_path_buf())
}

/// Strip any directory components from a caller-supplied file name.
pub fn sanitize_file_name(name: &str) -> Result<String> {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| DoclensError::InvalidInput(format!("invalid file name: {name:?}")))
}

/// Unique path inside `dir` for an upload named `file_name`.
///
/// The original name is kept as a suffix so its extension still drives
/// extraction.
pub fn unique_upload_path(dir: &Path, file_name: &str) -> PathBuf {
    dir.join(format!("{}_{}", Uuid::new_v4(), file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(sanitize_file_name("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_file_name("id.png").unwrap(), "id.png");
        assert!(sanitize_file_name("..").is_err());
        assert!(sanitize_file_name("").is_err());
    }

    #[test]
    fn unique_path_keeps_extension() {
        let dir = Path::new("/tmp/uploads");
        let a = unique_upload_path(dir, "id.PNG");
        let b = unique_upload_path(dir, "id.PNG");
        assert_ne!(a, b);
        assert_eq!(a.extension().unwrap(), "PNG");
        assert!(a.file_name().unwrap().to_string_lossy().ends_with("_id.PNG"));
    }

    #[test]
    fn ensure_creates_nested_dirs() {
        let root = tempfile::tempdir().unwrap();
        let dir = ensure(&root.path().join("a").join("b")).unwrap();
        assert!(dir.is_dir());
    }
}
