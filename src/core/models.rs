use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::errors::ParseFailure;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub name: String,
    pub score: u8,
    pub is_core: bool,
}

impl Subject {
    pub fn new(name: impl Into<String>, score: u8, is_core: bool) -> Self {
        Self {
            name: name.into(),
            score,
            is_core,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub grade: u8,
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub selected_interests: BTreeSet<String>,
    #[serde(default)]
    pub selected_skills: BTreeSet<String>,
    pub aps_score: u32,
}

impl StudentProfile {
    pub fn empty() -> Self {
        Self {
            grade: 9,
            subjects: Vec::new(),
            selected_interests: BTreeSet::new(),
            selected_skills: BTreeSet::new(),
            aps_score: 0,
        }
    }

    pub fn has_subjects(&self) -> bool {
        !self.subjects.is_empty()
    }
}

impl Default for StudentProfile {
    fn default() -> Self {
        Self::empty()
    }
}

/// A subject as read off the document, before it is promoted to a [`Subject`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedSubject {
    pub name: String,
    pub score: u8,
    /// Set when no score could be read and a plausible one was substituted.
    #[serde(default)]
    pub is_synthesized: bool,
}

impl ExtractedSubject {
    pub fn measured(name: impl Into<String>, score: u8) -> Self {
        Self {
            name: name.into(),
            score,
            is_synthesized: false,
        }
    }

    pub fn synthesized(name: impl Into<String>, score: u8) -> Self {
        Self {
            name: name.into(),
            score,
            is_synthesized: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub subjects: Vec<ExtractedSubject>,
    pub raw_text: String,
    pub confidence: f64,
    pub error: Option<String>,
}

impl ParseResult {
    pub fn failure(raw_text: impl Into<String>, failure: ParseFailure) -> Self {
        Self {
            subjects: Vec::new(),
            raw_text: raw_text.into(),
            confidence: 0.0,
            error: Some(failure.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && !self.subjects.is_empty()
    }

    pub fn has_synthesized_scores(&self) -> bool {
        self.subjects.iter().any(|s| s.is_synthesized)
    }

    /// True when the caller should ask the student to double-check the scores.
    pub fn needs_review(&self, threshold: f64) -> bool {
        self.confidence < threshold || self.has_synthesized_scores()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationType {
    CareerGuidance,
    UniversityRecommendation,
    Requirements,
    StreamRecommendation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdmissionStatus {
    ExceedsRequirement,
    MeetsRequirement,
    BelowRequirement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct University {
    pub name: String,
    pub program: String,
    pub location: String,
    pub aps_requirement: u32,
    pub status: AdmissionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Demand {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Career {
    pub title: String,
    pub description: String,
    pub demand: Demand,
    pub requirements: Vec<String>,
    pub skills_needed: Vec<String>,
    pub elevator_pitch: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub name: String,
    pub location: String,
    pub distance: String,
    #[serde(rename = "type")]
    pub school_type: String,
    pub streams: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub universities: Vec<University>,
    #[serde(default)]
    pub careers: Vec<Career>,
    #[serde(default)]
    pub schools: Vec<School>,
}

impl Recommendation {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        kind: RecommendationType,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind,
            requirements: Vec::new(),
            universities: Vec::new(),
            careers: Vec::new(),
            schools: Vec::new(),
        }
    }
}

/// A score typed in by the student. Validated before it becomes a [`Subject`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualEntry {
    pub name: String,
    pub score: i32,
}

impl ManualEntry {
    pub fn new(name: impl Into<String>, score: i32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuntimeSettings {
    pub tesseract_path: String,
    pub pdftoppm_path: String,
    pub ocr_language: String,
    pub ocr_timeout_seconds: u64,
    pub min_pdf_text_length: usize,
    pub review_confidence_threshold: f64,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            tesseract_path: "tesseract".to_string(),
            pdftoppm_path: "pdftoppm".to_string(),
            ocr_language: "eng".to_string(),
            ocr_timeout_seconds: 120,
            min_pdf_text_length: 10,
            review_confidence_threshold: 0.8,
        }
    }
}

impl RuntimeSettings {
    pub fn sanitized(mut self) -> Self {
        if self.tesseract_path.trim().is_empty() {
            self.tesseract_path = "tesseract".to_string();
        }
        if self.pdftoppm_path.trim().is_empty() {
            self.pdftoppm_path = "pdftoppm".to_string();
        }
        if self.ocr_language.trim().is_empty() {
            self.ocr_language = "eng".to_string();
        }
        self.ocr_timeout_seconds = self.ocr_timeout_seconds.max(1);
        self.review_confidence_threshold = if self.review_confidence_threshold.is_finite() {
            self.review_confidence_threshold.clamp(0.0, 1.0)
        } else {
            0.8
        };
        self
    }
}
