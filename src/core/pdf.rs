use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use anyhow::{bail, Context};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use super::models::RuntimeSettings;
use super::ocr::TesseractCliOcrService;

const RASTER_DPI: &str = "300";

/// Renders PDF pages to PNG files with the `pdftoppm` executable so a scan
/// can be handed to OCR page by page.
#[derive(Clone)]
pub struct PdftoppmRasterizer {
    pub pdftoppm_executable_path: String,
    pub timeout: Duration,
}

impl PdftoppmRasterizer {
    pub fn new(pdftoppm_executable_path: String, timeout: Duration) -> Self {
        Self {
            pdftoppm_executable_path,
            timeout,
        }
    }

    pub fn from_settings(settings: &RuntimeSettings) -> Self {
        Self::new(
            settings.pdftoppm_path.clone(),
            Duration::from_secs(settings.ocr_timeout_seconds),
        )
    }

    /// Writes one PNG per page into `output_dir` and returns them in page order.
    pub async fn rasterize(
        &self,
        data: &[u8],
        output_dir: &Path,
    ) -> anyhow::Result<Vec<PathBuf>> {
        let input_path = output_dir.join("report-card.pdf");
        tokio::fs::write(&input_path, data)
            .await
            .context("failed to stage PDF for rasterization")?;

        let mut command = Command::new(&self.pdftoppm_executable_path);
        command
            .arg("-png")
            .arg("-r")
            .arg(RASTER_DPI)
            .arg(&input_path)
            .arg(output_dir.join("page"))
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match timeout(self.timeout, command.output()).await {
            Ok(result) => result.with_context(|| {
                format!("failed to run {}", self.pdftoppm_executable_path)
            })?,
            Err(_) => bail!("PDF rasterization timed out after {:?}", self.timeout),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "PDF rasterization exited with {}: {}",
                output.status,
                stderr.trim()
            );
        }

        let pages = page_images(output_dir).await?;
        if pages.is_empty() {
            bail!("PDF rasterization produced no pages");
        }
        Ok(pages)
    }
}

/// PNG files in `dir`, sorted by name. `pdftoppm` zero-pads page numbers,
/// so name order is page order.
async fn page_images(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("failed to list {}", dir.display()))?;

    let mut pages = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_png = path
            .extension()
            .and_then(|v| v.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if is_png {
            pages.push(path);
        }
    }
    pages.sort();
    Ok(pages)
}

pub struct PdfTextExtractor {
    rasterizer: PdftoppmRasterizer,
    ocr_service: TesseractCliOcrService,
    min_text_length: usize,
}

impl PdfTextExtractor {
    pub fn new(
        rasterizer: PdftoppmRasterizer,
        ocr_service: TesseractCliOcrService,
        min_text_length: usize,
    ) -> Self {
        Self {
            rasterizer,
            ocr_service,
            min_text_length,
        }
    }

    /// Embedded PDF text, or OCR output when the PDF is a scan with little or
    /// no text layer. The flag reports whether OCR was used.
    pub async fn extract_text_with_ocr_fallback(
        &self,
        data: &[u8],
    ) -> anyhow::Result<(String, bool)> {
        match self.extract_pdf_text(data) {
            Ok(text) if text.trim().chars().count() >= self.min_text_length => {
                Ok((text, false))
            }
            Ok(text) => {
                debug!(
                    length = text.trim().chars().count(),
                    "PDF text layer too short, falling back to OCR"
                );
                Ok((self.ocr_pages(data).await?, true))
            }
            Err(err) => {
                debug!(error = %err, "PDF text extraction failed, falling back to OCR");
                Ok((self.ocr_pages(data).await?, true))
            }
        }
    }

    async fn ocr_pages(&self, data: &[u8]) -> anyhow::Result<String> {
        let temp_dir = tempfile::Builder::new()
            .prefix("edupath-pdf-")
            .tempdir()
            .context("failed to create PDF raster temp dir")?;

        let pages = self.rasterizer.rasterize(data, temp_dir.path()).await?;
        debug!(pages = pages.len(), "PDF rasterized for OCR");

        let mut text = String::new();
        for page in &pages {
            let page_text = self
                .ocr_service
                .recognize_file(page)
                .await
                .with_context(|| format!("OCR failed on {}", page.display()))?;
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(page_text.trim_end());
        }
        Ok(text)
    }

    fn extract_pdf_text(&self, data: &[u8]) -> anyhow::Result<String> {
        let text = pdf_extract::extract_text_from_mem(data)?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor(pdftoppm: &str, tesseract: &str) -> PdfTextExtractor {
        PdfTextExtractor::new(
            PdftoppmRasterizer::new(pdftoppm.to_string(), Duration::from_secs(5)),
            TesseractCliOcrService::new(
                tesseract.to_string(),
                "eng".to_string(),
                Duration::from_secs(5),
            ),
            10,
        )
    }

    #[tokio::test]
    async fn unreadable_pdf_goes_through_rasterizer() {
        let err = extractor("/nonexistent/edupath-pdftoppm", "/nonexistent/edupath-tesseract")
            .extract_text_with_ocr_fallback(b"%PDF-1.4 scanned page, no text layer")
            .await
            .unwrap_err();

        let message = format!("{err:#}");
        assert!(message.contains("failed to run /nonexistent/edupath-pdftoppm"));
        assert!(!message.contains("tesseract"));
    }

    #[tokio::test]
    async fn page_images_are_listed_in_page_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["page-10.png", "page-02.png", "report-card.pdf", "page-01.png"] {
            tokio::fs::write(dir.path().join(name), b"").await.unwrap();
        }

        let pages: Vec<String> = page_images(dir.path())
            .await
            .unwrap()
            .iter()
            .filter_map(|p| p.file_name()?.to_str().map(str::to_string))
            .collect();
        assert_eq!(pages, vec!["page-01.png", "page-02.png", "page-10.png"]);
    }

    #[test]
    fn rasterizer_follows_settings() {
        let settings = RuntimeSettings {
            pdftoppm_path: "/opt/poppler/pdftoppm".to_string(),
            ocr_timeout_seconds: 45,
            ..RuntimeSettings::default()
        };
        let rasterizer = PdftoppmRasterizer::from_settings(&settings);
        assert_eq!(rasterizer.pdftoppm_executable_path, "/opt/poppler/pdftoppm");
        assert_eq!(rasterizer.timeout, Duration::from_secs(45));
    }
}
