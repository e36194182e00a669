use std::path::Path;

use rand::Rng;
use tracing::{debug, info, warn};

use super::errors::ParseFailure;
use super::models::{ExtractedSubject, ParseResult, RuntimeSettings};
use super::ocr::TesseractCliOcrService;
use super::pdf::{PdfTextExtractor, PdftoppmRasterizer};
use super::score_extractor::{extract_score, score_confidence, split_score_cells};
use super::subject_catalog;

const MIN_TEXT_LENGTH: usize = 10;
const MIN_LINE_LENGTH: usize = 3;

const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp"];

/// Turns recognized report-card text into subjects and scores.
pub fn parse_text(raw_text: &str) -> ParseResult {
    parse_text_with_rng(raw_text, &mut rand::rng())
}

/// Same as [`parse_text`] with the random source for synthesized scores
/// supplied by the caller.
pub fn parse_text_with_rng<R: Rng>(raw_text: &str, rng: &mut R) -> ParseResult {
    let length = raw_text.chars().count();
    if length < MIN_TEXT_LENGTH {
        warn!(length, "not enough text to parse");
        return ParseResult::failure(raw_text, ParseFailure::InsufficientText { length });
    }

    let mut subjects = extract_line_by_line(raw_text);
    debug!(count = subjects.len(), "line pass complete");

    if subjects.is_empty() {
        debug!("no subjects found line by line, trying pattern matching");
        subjects = extract_by_pattern(raw_text, rng);
        debug!(count = subjects.len(), "pattern matching complete");
    }

    let confidence = score_confidence(&subjects);
    info!(
        subjects = subjects.len(),
        confidence, "report card text parsed"
    );

    let error = subjects
        .is_empty()
        .then(|| ParseFailure::NoSubjectsFound.to_string());

    ParseResult {
        subjects,
        raw_text: raw_text.to_string(),
        confidence,
        error,
    }
}

fn extract_line_by_line(raw_text: &str) -> Vec<ExtractedSubject> {
    let mut subjects: Vec<ExtractedSubject> = Vec::new();

    for line in raw_text.lines() {
        let clean = line.trim().to_lowercase();
        if clean.chars().count() < MIN_LINE_LENGTH {
            continue;
        }

        for cell in split_score_cells(&clean) {
            let Some(name) = subject_catalog::canonicalize(cell) else {
                continue;
            };

            match extract_score(cell) {
                Some(score) => {
                    if subjects.iter().any(|s| s.name == name) {
                        debug!(subject = name, "duplicate mention ignored");
                        continue;
                    }
                    debug!(subject = name, score, "subject found");
                    subjects.push(ExtractedSubject::measured(name, score));
                }
                None => debug!(subject = name, line = cell, "subject without score"),
            }
        }
    }

    subjects
}

fn extract_by_pattern<R: Rng>(raw_text: &str, rng: &mut R) -> Vec<ExtractedSubject> {
    let lines: Vec<String> = raw_text.lines().map(|l| l.to_lowercase()).collect();
    let mut subjects: Vec<ExtractedSubject> = Vec::new();

    for (name, keywords) in subject_catalog::fallback_patterns() {
        let Some(line) = lines
            .iter()
            .find(|line| keywords.iter().any(|k| line.contains(*k)))
        else {
            continue;
        };

        if subjects.iter().any(|s| s.name == *name) {
            continue;
        }

        let subject = match extract_score(line) {
            Some(score) => ExtractedSubject::measured(*name, score),
            None => {
                let (low, high) = subject_catalog::plausible_score_range(name);
                let score = rng.random_range(low..=high);
                warn!(subject = name, score, "score unreadable, using synthesized value");
                ExtractedSubject::synthesized(*name, score)
            }
        };
        subjects.push(subject);
    }

    subjects
}

/// Reads report-card files (plain text, PDF or scanned image) and parses
/// the recognized text.
pub struct ReportCardDocumentParser {
    pdf_text_extractor: PdfTextExtractor,
    ocr_service: TesseractCliOcrService,
}

impl ReportCardDocumentParser {
    pub fn new(pdf_text_extractor: PdfTextExtractor, ocr_service: TesseractCliOcrService) -> Self {
        Self {
            pdf_text_extractor,
            ocr_service,
        }
    }

    pub fn from_settings(settings: &RuntimeSettings) -> Self {
        let ocr = TesseractCliOcrService::from_settings(settings);
        let pdf = PdfTextExtractor::new(
            PdftoppmRasterizer::from_settings(settings),
            ocr.clone(),
            settings.min_pdf_text_length,
        );
        Self::new(pdf, ocr)
    }

    pub async fn parse_report_card_bytes(&self, file_name: &str, data: &[u8]) -> ParseResult {
        match self.recognize_text(file_name, data).await {
            Ok(text) => parse_text(&text),
            Err(err) => {
                warn!(file_name, error = %err, "text recognition failed");
                ParseResult::failure(String::new(), ParseFailure::RecognitionFailure(err))
            }
        }
    }

    async fn recognize_text(&self, file_name: &str, data: &[u8]) -> Result<String, String> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|v| v.to_str())
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "txt" => String::from_utf8(data.to_vec())
                .map_err(|_| "Text file is not valid UTF-8".to_string()),
            "pdf" => self
                .pdf_text_extractor
                .extract_text_with_ocr_fallback(data)
                .await
                .map(|(text, ocr_used)| {
                    debug!(ocr_used, "PDF text obtained");
                    text
                })
                .map_err(|err| format!("{err:#}")),
            ext if IMAGE_EXTENSIONS.contains(&ext) => self
                .ocr_service
                .extract_text(ext, data)
                .await
                .map_err(|err| format!("{err:#}")),
            _ => Err(format!("Unsupported file type: {file_name}")),
        }
    }
}
