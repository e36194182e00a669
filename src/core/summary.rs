use serde::{Deserialize, Serialize};

use super::models::{Recommendation, Subject};

/// How a set of marks spreads over the report-card performance bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    pub total: usize,
    pub excellent: usize,
    pub good: usize,
    pub average: usize,
    pub needs_improvement: usize,
    /// Subjects at 60% or above, the cut used on the senior dashboard.
    pub strong: usize,
}

impl PerformanceSummary {
    pub fn from_subjects(subjects: &[Subject]) -> Self {
        let mut summary = Self {
            total: subjects.len(),
            ..Self::default()
        };

        for subject in subjects {
            match subject.score {
                70.. => summary.excellent += 1,
                60..=69 => summary.good += 1,
                50..=59 => summary.average += 1,
                _ => summary.needs_improvement += 1,
            }
            if subject.score >= 60 {
                summary.strong += 1;
            }
        }

        summary
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationDigest {
    pub career_count: usize,
    pub university_count: usize,
    pub school_count: usize,
}

impl RecommendationDigest {
    pub fn from_recommendations(recommendations: &[Recommendation]) -> Self {
        Self {
            career_count: recommendations.iter().map(|r| r.careers.len()).sum(),
            university_count: recommendations.iter().map(|r| r.universities.len()).sum(),
            school_count: recommendations.iter().map(|r| r.schools.len()).sum(),
        }
    }
}
