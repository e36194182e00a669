use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::aps::compute_aps;
use super::errors::CoreError;
use super::models::{ManualEntry, ParseResult, Recommendation, StudentProfile, Subject};
use super::recommendation_engine;
use super::subject_catalog;

pub const AVAILABLE_INTERESTS: [&str; 8] = [
    "Technology",
    "Engineering",
    "Healthcare",
    "Business",
    "Arts",
    "Science",
    "Education",
    "Sports",
];

pub const AVAILABLE_SKILLS: [&str; 6] = [
    "Problem Solving",
    "Communication",
    "Leadership",
    "Creativity",
    "Analytical Thinking",
    "Teamwork",
];

#[derive(Debug, Clone)]
pub enum ProfileEvent {
    ProfileUpdated {
        profile: Arc<StudentProfile>,
        at: DateTime<Utc>,
    },
    RecommendationsUpdated(Arc<Vec<Recommendation>>),
    AnalysisCompleted(Arc<ParseResult>),
    Cleared,
}

/// Current student profile plus the recommendations derived from it.
///
/// Every change builds a fresh [`StudentProfile`] and swaps it in; snapshots
/// handed out earlier are never touched. Observers receive [`ProfileEvent`]s
/// over the channel returned by [`ProfileStore::subscribe`].
pub struct ProfileStore {
    profile: Arc<StudentProfile>,
    recommendations: Arc<Vec<Recommendation>>,
    last_analysis: Option<Arc<ParseResult>>,
    subscribers: Vec<mpsc::UnboundedSender<ProfileEvent>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self {
            profile: Arc::new(StudentProfile::empty()),
            recommendations: Arc::new(Vec::new()),
            last_analysis: None,
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<ProfileEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn profile(&self) -> Arc<StudentProfile> {
        Arc::clone(&self.profile)
    }

    pub fn recommendations(&self) -> Arc<Vec<Recommendation>> {
        Arc::clone(&self.recommendations)
    }

    pub fn last_analysis(&self) -> Option<Arc<ParseResult>> {
        self.last_analysis.clone()
    }

    /// Adopts the subjects of a successful document analysis.
    pub fn accept_parse_result(
        &mut self,
        result: ParseResult,
        grade: u8,
    ) -> Result<Arc<StudentProfile>, CoreError> {
        ensure_grade(grade)?;

        let result = Arc::new(result);
        self.last_analysis = Some(Arc::clone(&result));
        self.publish(ProfileEvent::AnalysisCompleted(Arc::clone(&result)));

        if result.subjects.is_empty() {
            let reason = result
                .error
                .clone()
                .unwrap_or_else(|| "no subjects".to_string());
            return Err(CoreError::AnalysisFailed(reason));
        }

        let subjects = result
            .subjects
            .iter()
            .map(|extracted| {
                Subject::new(
                    extracted.name.clone(),
                    extracted.score,
                    subject_catalog::is_core(&extracted.name),
                )
            })
            .collect();

        info!(
            grade,
            confidence = result.confidence,
            synthesized = result.has_synthesized_scores(),
            "document analysis accepted"
        );
        Ok(self.replace_subjects(grade, subjects))
    }

    /// Adopts scores typed in by the student. Names are mapped onto catalog
    /// subjects and scores outside 0..=100 are rejected; a subject entered
    /// twice, under any spelling, keeps its first position and its last score.
    pub fn submit_manual_results(
        &mut self,
        grade: u8,
        entries: Vec<ManualEntry>,
    ) -> Result<Arc<StudentProfile>, CoreError> {
        ensure_grade(grade)?;
        let subjects = validate_manual_entries(entries)?;
        info!(grade, subjects = subjects.len(), "manual results accepted");
        Ok(self.replace_subjects(grade, subjects))
    }

    pub fn load_sample_data(&mut self, grade: u8) -> Result<Arc<StudentProfile>, CoreError> {
        let subjects = sample_subjects(grade).ok_or_else(|| {
            CoreError::InvalidRequest(format!("no sample results for grade {grade}"))
        })?;
        Ok(self.replace_subjects(grade, subjects))
    }

    pub fn update_interests<I, S>(&mut self, interests: I) -> Arc<StudentProfile>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selected = known_tags(interests, &AVAILABLE_INTERESTS);
        let profile = StudentProfile {
            selected_interests: selected,
            ..(*self.profile).clone()
        };
        self.commit(profile)
    }

    pub fn update_skills<I, S>(&mut self, skills: I) -> Arc<StudentProfile>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selected = known_tags(skills, &AVAILABLE_SKILLS);
        let profile = StudentProfile {
            selected_skills: selected,
            ..(*self.profile).clone()
        };
        self.commit(profile)
    }

    pub fn clear(&mut self) {
        self.profile = Arc::new(StudentProfile::empty());
        self.recommendations = Arc::new(Vec::new());
        self.last_analysis = None;
        self.publish(ProfileEvent::Cleared);
    }

    fn replace_subjects(&mut self, grade: u8, subjects: Vec<Subject>) -> Arc<StudentProfile> {
        let profile = StudentProfile {
            grade,
            subjects,
            ..(*self.profile).clone()
        };
        self.commit(profile)
    }

    fn commit(&mut self, mut profile: StudentProfile) -> Arc<StudentProfile> {
        profile.aps_score = compute_aps(&profile.subjects);
        let recommendations = recommendation_engine::generate_for_profile(&profile);

        self.profile = Arc::new(profile);
        self.recommendations = Arc::new(recommendations);

        self.publish(ProfileEvent::ProfileUpdated {
            profile: Arc::clone(&self.profile),
            at: Utc::now(),
        });
        self.publish(ProfileEvent::RecommendationsUpdated(Arc::clone(
            &self.recommendations,
        )));

        Arc::clone(&self.profile)
    }

    fn publish(&mut self, event: ProfileEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        debug!(subscribers = self.subscribers.len(), "profile event published");
    }
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_grade(grade: u8) -> Result<(), CoreError> {
    if (9..=12).contains(&grade) {
        Ok(())
    } else {
        Err(CoreError::UnsupportedGrade(grade))
    }
}

fn validate_manual_entries(entries: Vec<ManualEntry>) -> Result<Vec<Subject>, CoreError> {
    if entries.is_empty() {
        return Err(CoreError::EmptyManualEntry);
    }

    let mut subjects: Vec<Subject> = Vec::with_capacity(entries.len());
    for entry in entries {
        let name = entry.name.trim();
        if name.is_empty() {
            return Err(CoreError::InvalidRequest(
                "subject name is required".to_string(),
            ));
        }

        let canonical = subject_catalog::canonicalize(name)
            .ok_or_else(|| CoreError::UnknownSubject(name.to_string()))?;

        let score = u8::try_from(entry.score)
            .ok()
            .filter(|score| *score <= 100)
            .ok_or_else(|| CoreError::InvalidManualScore {
                subject: canonical.to_string(),
                score: entry.score,
            })?;

        match subjects.iter_mut().find(|s| s.name == canonical) {
            Some(existing) => existing.score = score,
            None => subjects.push(Subject::new(
                canonical,
                score,
                subject_catalog::is_core(canonical),
            )),
        }
    }

    Ok(subjects)
}

fn known_tags<I, S>(values: I, allowed: &[&str]) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .filter_map(|value| {
            let value = value.as_ref().trim();
            allowed
                .iter()
                .find(|known| known.eq_ignore_ascii_case(value))
                .map(|known| known.to_string())
        })
        .collect()
}

/// Demonstration report cards for students who want to explore first.
pub fn sample_subjects(grade: u8) -> Option<Vec<Subject>> {
    let rows: &[(&str, u8, bool)] = match grade {
        9 => &[
            ("English Home Language", 75, true),
            ("Mathematics", 82, true),
            ("Natural Sciences", 78, true),
            ("Social Sciences", 65, false),
            ("Technology", 71, false),
            ("Life Orientation", 80, true),
            ("Economic Management Sciences", 67, false),
            ("Creative Arts", 73, false),
        ],
        10 => &[
            ("Home Language", 65, true),
            ("First Additional Language", 58, true),
            ("Mathematics", 72, true),
            ("Natural Sciences", 68, true),
            ("Technology", 75, true),
            ("Social Sciences", 62, true),
            ("Economic Management Sciences", 55, true),
            ("Life Orientation", 78, true),
        ],
        _ => return None,
    };

    Some(
        rows.iter()
            .map(|(name, score, is_core)| Subject::new(*name, *score, *is_core))
            .collect(),
    )
}
