pub mod core;

pub use crate::core::aps::compute_aps;
pub use crate::core::document_parser::{parse_text, ReportCardDocumentParser};
pub use crate::core::errors::{CoreError, ParseFailure};
pub use crate::core::models::{
    AdmissionStatus, Career, ExtractedSubject, ManualEntry, ParseResult, Recommendation,
    RecommendationType, School, StudentProfile, Subject, University,
};
pub use crate::core::profile_store::{ProfileEvent, ProfileStore};
pub use crate::core::recommendation_engine::generate;
