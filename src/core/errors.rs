use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid score {score} for {subject}: scores must be between 0 and 100")]
    InvalidManualScore { subject: String, score: i32 },
    #[error("Grade {0} is not supported. Choose a grade between 9 and 12.")]
    UnsupportedGrade(u8),
    #[error("Unknown subject \"{0}\"")]
    UnknownSubject(String),
    #[error("At least one subject is required")]
    EmptyManualEntry,
    #[error("Document analysis produced no usable subjects: {0}")]
    AnalysisFailed(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl CoreError {
    pub fn is_user_correctable(&self) -> bool {
        match self {
            CoreError::InvalidManualScore { .. }
            | CoreError::UnsupportedGrade(_)
            | CoreError::UnknownSubject(_)
            | CoreError::EmptyManualEntry
            | CoreError::AnalysisFailed(_) => true,
            CoreError::InvalidRequest(_) => false,
        }
    }
}

/// Reasons a document produced no usable subjects. Carried as data inside
/// `ParseResult.error`, never propagated as a fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("Not enough text extracted from document (only {length} characters)")]
    InsufficientText { length: usize },
    #[error("No subject scores found in the document")]
    NoSubjectsFound,
    #[error("Analysis failed: {0}")]
    RecognitionFailure(String),
}
