use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use anyhow::{bail, Context};
use tokio::process::Command;
use tokio::time::timeout;

use super::models::RuntimeSettings;

/// Hands a scanned report card to the `tesseract` executable and returns
/// whatever text it recognized. One invocation per call, no retries.
#[derive(Clone)]
pub struct TesseractCliOcrService {
    pub tesseract_executable_path: String,
    pub language: String,
    pub timeout: Duration,
}

impl TesseractCliOcrService {
    pub fn new(tesseract_executable_path: String, language: String, timeout: Duration) -> Self {
        Self {
            tesseract_executable_path,
            language,
            timeout,
        }
    }

    pub fn from_settings(settings: &RuntimeSettings) -> Self {
        Self::new(
            settings.tesseract_path.clone(),
            settings.ocr_language.clone(),
            Duration::from_secs(settings.ocr_timeout_seconds),
        )
    }

    pub async fn extract_text(&self, extension: &str, bytes: &[u8]) -> anyhow::Result<String> {
        let temp_dir = tempfile::Builder::new()
            .prefix("edupath-ocr-")
            .tempdir()
            .context("failed to create OCR temp dir")?;

        let input_path: PathBuf = temp_dir.path().join(format!("report-card.{extension}"));
        tokio::fs::write(&input_path, bytes)
            .await
            .context("failed to stage report card for OCR")?;

        self.recognize_file(&input_path).await
    }

    /// Runs recognition on an image already on disk.
    pub async fn recognize_file(&self, input_path: &Path) -> anyhow::Result<String> {
        let mut command = Command::new(&self.tesseract_executable_path);
        command
            .arg(input_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match timeout(self.timeout, command.output()).await {
            Ok(result) => result.with_context(|| {
                format!("failed to run {}", self.tesseract_executable_path)
            })?,
            Err(_) => bail!("text recognition timed out after {:?}", self.timeout),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "text recognition exited with {}: {}",
                output.status,
                stderr.trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_executable_is_reported_as_error() {
        let service = TesseractCliOcrService::new(
            "/nonexistent/edupath-tesseract".to_string(),
            "eng".to_string(),
            Duration::from_secs(5),
        );

        let err = service
            .extract_text("png", b"not really a png")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to run"));
    }

    #[test]
    fn settings_drive_service_configuration() {
        let settings = RuntimeSettings {
            tesseract_path: "/opt/tesseract".to_string(),
            ocr_language: "afr".to_string(),
            ocr_timeout_seconds: 30,
            ..RuntimeSettings::default()
        };
        let service = TesseractCliOcrService::from_settings(&settings);
        assert_eq!(service.tesseract_executable_path, "/opt/tesseract");
        assert_eq!(service.language, "afr");
        assert_eq!(service.timeout, Duration::from_secs(30));
    }
}
