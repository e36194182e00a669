use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{mpsc, Mutex, RwLock};
use tracing::{info, warn};

use super::document_parser::ReportCardDocumentParser;
use super::errors::CoreError;
use super::models::{ManualEntry, ParseResult, Recommendation, RuntimeSettings, StudentProfile};
use super::profile_store::{ProfileEvent, ProfileStore};
use super::settings_store::SettingsStore;
use super::summary::{PerformanceSummary, RecommendationDigest};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub analysis: ParseResult,
    pub needs_review: bool,
    pub accepted: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSnapshot {
    pub profile: StudentProfile,
    pub summary: PerformanceSummary,
    pub digest: RecommendationDigest,
    pub recommendations: Vec<Recommendation>,
}

/// Entry point for a presentation layer: reads report cards, keeps the
/// profile and exposes it as serializable snapshots.
pub struct CoreService {
    settings_store: SettingsStore,
    settings: RwLock<RuntimeSettings>,
    profile_store: Mutex<ProfileStore>,
}

impl CoreService {
    pub async fn new() -> anyhow::Result<Arc<Self>> {
        Self::with_settings_store(SettingsStore::new()).await
    }

    pub async fn with_settings_store(settings_store: SettingsStore) -> anyhow::Result<Arc<Self>> {
        let settings = match settings_store.load().await {
            Ok(settings) => settings,
            Err(err) => {
                warn!(error = %err, path = %settings_store.path().display(), "using default settings");
                RuntimeSettings::default()
            }
        };

        Ok(Arc::new(Self {
            settings_store,
            settings: RwLock::new(settings),
            profile_store: Mutex::new(ProfileStore::new()),
        }))
    }

    pub async fn get_settings(&self) -> RuntimeSettings {
        self.settings.read().await.clone()
    }

    pub async fn save_settings(
        &self,
        new_settings: RuntimeSettings,
    ) -> anyhow::Result<RuntimeSettings> {
        let runtime = new_settings.sanitized();
        self.settings_store.save(&runtime).await?;

        let mut settings = self.settings.write().await;
        *settings = runtime.clone();
        Ok(runtime)
    }

    pub async fn override_settings(&self, new_settings: RuntimeSettings) {
        let mut settings = self.settings.write().await;
        *settings = new_settings.sanitized();
    }

    /// Recognizes and parses a report card, then adopts its subjects when
    /// any were found. A document without usable subjects is not an error
    /// here; the outcome carries the parse error for display.
    pub async fn analyze_report_card(
        &self,
        file_name: &str,
        file_bytes: &[u8],
        grade: u8,
    ) -> anyhow::Result<AnalysisOutcome> {
        if !(9..=12).contains(&grade) {
            return Err(CoreError::UnsupportedGrade(grade).into());
        }

        let settings = self.settings.read().await.clone();
        let parser = ReportCardDocumentParser::from_settings(&settings);
        let analysis = parser.parse_report_card_bytes(file_name, file_bytes).await;
        let needs_review = analysis.needs_review(settings.review_confidence_threshold);

        let accepted = match self
            .profile_store
            .lock()
            .await
            .accept_parse_result(analysis.clone(), grade)
        {
            Ok(_) => true,
            Err(CoreError::AnalysisFailed(reason)) => {
                info!(file_name, reason, "report card not adopted");
                false
            }
            Err(err) => return Err(err.into()),
        };

        Ok(AnalysisOutcome {
            analysis,
            needs_review,
            accepted,
        })
    }

    pub async fn submit_manual_results(
        &self,
        grade: u8,
        entries: Vec<ManualEntry>,
    ) -> anyhow::Result<ProfileSnapshot> {
        let mut store = self.profile_store.lock().await;
        store.submit_manual_results(grade, entries)?;
        Ok(snapshot_of(&store))
    }

    pub async fn update_interests(&self, interests: Vec<String>) -> ProfileSnapshot {
        let mut store = self.profile_store.lock().await;
        store.update_interests(interests);
        snapshot_of(&store)
    }

    pub async fn update_skills(&self, skills: Vec<String>) -> ProfileSnapshot {
        let mut store = self.profile_store.lock().await;
        store.update_skills(skills);
        snapshot_of(&store)
    }

    pub async fn clear(&self) {
        self.profile_store.lock().await.clear();
    }

    pub async fn subscribe(&self) -> mpsc::UnboundedReceiver<ProfileEvent> {
        self.profile_store.lock().await.subscribe()
    }

    pub async fn snapshot(&self) -> ProfileSnapshot {
        snapshot_of(&*self.profile_store.lock().await)
    }
}

fn snapshot_of(store: &ProfileStore) -> ProfileSnapshot {
    let profile = store.profile();
    let recommendations = store.recommendations();

    ProfileSnapshot {
        summary: PerformanceSummary::from_subjects(&profile.subjects),
        digest: RecommendationDigest::from_recommendations(&recommendations),
        profile: (*profile).clone(),
        recommendations: (*recommendations).clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service() -> (tempfile::TempDir, Arc<CoreService>) {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::with_path(dir.path().join("settings.json"));
        let service = CoreService::with_settings_store(store).await.unwrap();
        (dir, service)
    }

    #[tokio::test]
    async fn text_report_card_is_adopted_into_profile() {
        let (_dir, service) = service().await;
        let mut events = service.subscribe().await;

        let outcome = service
            .analyze_report_card(
                "results.txt",
                b"Mathematics 64%\nNatural Sciences 71%\nBusiness Studies 66%",
                10,
            )
            .await
            .unwrap();

        assert!(outcome.accepted);
        assert!(outcome.needs_review);
        assert_eq!(outcome.analysis.subjects.len(), 3);

        let snapshot = service.snapshot().await;
        assert_eq!(snapshot.profile.grade, 10);
        assert_eq!(snapshot.profile.aps_score, 5 + 6 + 5);
        assert_eq!(snapshot.summary.total, 3);
        assert_eq!(snapshot.recommendations.len(), 2);
        assert!(matches!(
            events.try_recv(),
            Ok(ProfileEvent::AnalysisCompleted(_))
        ));
    }

    #[tokio::test]
    async fn unreadable_document_is_reported_not_adopted() {
        let (_dir, service) = service().await;
        let outcome = service
            .analyze_report_card("photo.gif", b"GIF89a", 9)
            .await
            .unwrap();

        assert!(!outcome.accepted);
        assert!(outcome.analysis.error.is_some());
        assert!(!service.snapshot().await.profile.has_subjects());
    }

    #[tokio::test]
    async fn invalid_grade_is_rejected_before_recognition() {
        let (_dir, service) = service().await;
        let err = service
            .analyze_report_card("results.txt", b"Mathematics 64%", 7)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::UnsupportedGrade(7))
        ));
    }

    #[tokio::test]
    async fn settings_round_trip_through_store() {
        let (_dir, service) = service().await;
        let saved = service
            .save_settings(RuntimeSettings {
                review_confidence_threshold: 0.6,
                ..RuntimeSettings::default()
            })
            .await
            .unwrap();
        assert_eq!(saved.review_confidence_threshold, 0.6);
        assert_eq!(service.get_settings().await.review_confidence_threshold, 0.6);
    }

    #[tokio::test]
    async fn manual_entry_errors_propagate() {
        let (_dir, service) = service().await;
        let err = service
            .submit_manual_results(11, vec![ManualEntry::new("Mathematics", 140)])
            .await
            .unwrap_err();
        assert!(err
            .downcast_ref::<CoreError>()
            .is_some_and(CoreError::is_user_correctable));
    }
}
