// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host-side service wrapping the analysis pipeline.
//
// The pipeline is synchronous and may block on OCR, so every analysis runs on
// its own blocking task with a timeout around it. The host, not the pipeline,
// owns the lifetime of uploaded temporary files.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use doclens_core::error::{DoclensError, Result};
use doclens_core::{AnalysisResult, AnalyzerConfig};
use doclens_document::DocumentAnalyzer;
use tracing::{info, warn};

use super::upload_dir;

/// Cheaply cloneable handle shared by all in-flight analyses.
#[derive(Clone)]
pub struct AnalysisService {
    analyzer: Arc<DocumentAnalyzer>,
    config: Arc<AnalyzerConfig>,
}

impl AnalysisService {
    pub fn new(config: AnalyzerConfig) -> Self {
        let analyzer = DocumentAnalyzer::from_config(&config);
        Self::with_analyzer(analyzer, config)
    }

    pub fn with_analyzer(analyzer: DocumentAnalyzer, config: AnalyzerConfig) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyse a file already on disk. The file is left untouched.
    pub async fn analyze_path(&self, path: PathBuf) -> Result<AnalysisResult> {
        if !path.is_file() {
            return Err(DoclensError::InvalidInput(format!(
                "{} is not a readable file",
                path.display()
            )));
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.run(path, file_name).await
    }

    /// Analyse several files concurrently. Results keep the input order.
    pub async fn analyze_many(&self, paths: Vec<PathBuf>) -> Vec<(PathBuf, Result<AnalysisResult>)> {
        let handles: Vec<_> = paths
            .into_iter()
            .map(|path| {
                let service = self.clone();
                let task_path = path.clone();
                (path, tokio::spawn(async move { service.analyze_path(task_path).await }))
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (path, handle) in handles {
            let result = handle
                .await
                .unwrap_or_else(|err| Err(DoclensError::Task(err.to_string())));
            results.push((path, result));
        }
        results
    }

    /// Persist uploaded bytes, analyse them, and delete the temporary file.
    pub async fn analyze_upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<AnalysisResult> {
        if bytes.is_empty() {
            return Err(DoclensError::InvalidInput("no file was uploaded".into()));
        }
        let file_name = upload_dir::sanitize_file_name(file_name)?;
        let dir = upload_dir::ensure(&self.config.upload_dir)?;
        let path = upload_dir::unique_upload_path(&dir, &file_name);

        self.analyze_persisted(path, file_name, &bytes).await
    }

    /// Write `bytes` to `path`, analyse, then remove `path` whether or not
    /// the write completed.
    async fn analyze_persisted(
        &self,
        path: PathBuf,
        file_name: String,
        bytes: &[u8],
    ) -> Result<AnalysisResult> {
        let result = match tokio::fs::write(&path, bytes).await {
            Ok(()) => {
                info!(path = %path.display(), bytes = bytes.len(), "upload persisted");
                self.run(path.clone(), file_name).await
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to persist upload");
                Err(DoclensError::Io(err))
            }
        };

        remove_upload(&path).await;
        result
    }

    async fn run(&self, path: PathBuf, file_name: String) -> Result<AnalysisResult> {
        let analyzer = Arc::clone(&self.analyzer);
        let timeout_secs = self.config.analysis_timeout_secs;

        let task = tokio::task::spawn_blocking(move || analyzer.analyze(&path, &file_name));

        // A timed-out blocking task is abandoned, not cancelled.
        match tokio::time::timeout(Duration::from_secs(timeout_secs), task).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(err)) => Err(DoclensError::Task(err.to_string())),
            Err(_) => {
                warn!(timeout_secs, "analysis timed out");
                Err(DoclensError::Timeout(timeout_secs))
            }
        }
    }
}

/// Best-effort removal; a file that was never created is not an error.
async fn remove_upload(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => warn!(path = %path.display(), error = %err, "failed to remove uploaded file"),
    }
}

#[cfg(test)]
mod tests {
    use doclens_core::{DocumentType, LanguageProfile};
    use doclens_document::extract::OcrCapability;

    use super::*;

    struct SlowOcr {
        delay: Duration,
        text: &'static str,
    }

    impl OcrCapability for SlowOcr {
        fn recognize(&self, _image_path: &Path, _language: &LanguageProfile) -> Result<String> {
            std::thread::sleep(self.delay);
            Ok(self.text.to_string())
        }

        fn name(&self) -> &'static str {
            "slow"
        }
    }

    fn config_in(dir: &Path) -> AnalyzerConfig {
        AnalyzerConfig {
            upload_dir: dir.join("uploads"),
            analysis_timeout_secs: 1,
            ..Default::default()
        }
    }

    fn service_with_ocr(config: AnalyzerConfig, ocr: SlowOcr) -> AnalysisService {
        let analyzer = DocumentAnalyzer::default().with_ocr(Arc::new(ocr));
        AnalysisService::with_analyzer(analyzer, config)
    }

    #[tokio::test]
    async fn upload_is_analysed_and_removed() {
        let root = tempfile::tempdir().unwrap();
        let service = AnalysisService::new(config_in(root.path()));

        let result = service
            .analyze_upload("note.txt", b"Nota Fiscal NF-e valor total R$100".to_vec())
            .await
            .unwrap();

        assert_eq!(result.file_name(), "note.txt");
        assert_eq!(result.document_type(), DocumentType::Invoice);
        assert_eq!(result.classification_confidence(), 85);

        let leftovers = std::fs::read_dir(root.path().join("uploads")).unwrap().count();
        assert_eq!(leftovers, 0, "temporary upload should be deleted");
    }

    #[tokio::test]
    async fn failed_write_is_reported_and_cleaned_up() {
        let root = tempfile::tempdir().unwrap();
        let service = AnalysisService::new(config_in(root.path()));
        let path = root.path().join("absent-dir").join("note.txt");

        let err = service
            .analyze_persisted(path.clone(), "note.txt".into(), b"Nota Fiscal")
            .await
            .unwrap_err();
        assert!(matches!(err, DoclensError::Io(_)));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn upload_removal_tolerates_missing_files() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("partial.txt");
        std::fs::write(&path, b"partial").unwrap();

        remove_upload(&path).await;
        assert!(!path.exists());
        remove_upload(&path).await;
    }

    #[tokio::test]
    async fn empty_upload_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        let service = AnalysisService::new(config_in(root.path()));
        let err = service.analyze_upload("id.png", Vec::new()).await.unwrap_err();
        assert!(matches!(err, DoclensError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn missing_path_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        let service = AnalysisService::new(config_in(root.path()));
        let err = service
            .analyze_path(root.path().join("missing.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, DoclensError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn image_upload_uses_ocr() {
        let root = tempfile::tempdir().unwrap();
        let service = service_with_ocr(
            config_in(root.path()),
            SlowOcr {
                delay: Duration::ZERO,
                text: "CARTEIRA NACIONAL DE HABILITAÇÃO Nome: João",
            },
        );

        let result = service.analyze_upload("id.png", vec![0x89, 0x50, 0x4e, 0x47]).await.unwrap();
        assert_eq!(result.document_type(), DocumentType::Identity);
        assert_eq!(result.readability_score(), 50);
    }

    #[tokio::test]
    async fn slow_analysis_times_out() {
        let root = tempfile::tempdir().unwrap();
        let service = service_with_ocr(
            config_in(root.path()),
            SlowOcr {
                delay: Duration::from_millis(2500),
                text: "",
            },
        );

        let err = service
            .analyze_upload("scan.jpg", vec![0xff, 0xd8, 0xff])
            .await
            .unwrap_err();
        assert!(matches!(err, DoclensError::Timeout(1)));
    }

    #[tokio::test]
    async fn many_files_keep_order() {
        let root = tempfile::tempdir().unwrap();
        let invoice = root.path().join("nota.txt");
        let address = root.path().join("fatura.txt");
        std::fs::write(&invoice, "DANFE valor total").unwrap();
        std::fs::write(&address, "Fatura de água").unwrap();

        let service = AnalysisService::new(config_in(root.path()));
        let results = service
            .analyze_many(vec![invoice.clone(), root.path().join("missing.txt"), address.clone()])
            .await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, invoice);
        assert_eq!(
            results[0].1.as_ref().unwrap().document_type(),
            DocumentType::Invoice
        );
        assert!(results[1].1.is_err());
        assert_eq!(
            results[2].1.as_ref().unwrap().document_type(),
            DocumentType::AddressProof
        );
    }
}
