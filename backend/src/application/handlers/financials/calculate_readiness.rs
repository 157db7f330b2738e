//! CalculateReadinessHandler - Scores a project and stores the profile.

use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::application::handlers::to_partial;
use crate::domain::analysis::ReadinessScorer;
use crate::domain::foundation::{DomainError, ProjectId};
use crate::domain::project::ReadinessProfile;
use crate::ports::ProjectRepository;

#[derive(Debug, Clone)]
pub struct CalculateReadinessCommand {
    pub project_id: ProjectId,
}

pub struct CalculateReadinessHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl CalculateReadinessHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CalculateReadinessCommand) -> Result<ReadinessProfile, DomainError> {
        let document = self.repository.get(&cmd.project_id).await?;
        let profile = ReadinessScorer::score(&document);

        let partial = json!({ "financials": { "readinessProfile": to_partial(&profile)? } });
        self.repository.update(&cmd.project_id, partial).await?;

        info!(
            project_id = %cmd.project_id,
            score = profile.score.value(),
            status = ?profile.status,
            "Readiness calculated"
        );
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::seeded;
    use crate::domain::analysis::{REC_ADD_VARIANT, REC_EXPLORE_FUNDING};
    use crate::domain::project::ReadinessStatus;

    #[tokio::test]
    async fn stores_profile_of_fresh_project() {
        let (store, id) = seeded().await;
        let profile = CalculateReadinessHandler::new(store.clone())
            .handle(CalculateReadinessCommand { project_id: id.clone() })
            .await
            .unwrap();

        assert_eq!(profile.status, ReadinessStatus::Incomplete);
        assert!(profile.recommendations.iter().any(|r| r == REC_ADD_VARIANT));
        let stored = store.get(&id).await.unwrap();
        assert_eq!(
            stored.financials.and_then(|f| f.readiness_profile),
            Some(profile)
        );
    }

    #[tokio::test]
    async fn complete_project_is_ready_with_funding_hint() {
        let (store, id) = seeded().await;
        ProjectRepository::update(
            store.as_ref(),
            &id,
            json!({
                "marketability": {
                    "nicheSuggestion": "Kopi begadang",
                    "positioningStatement": "Teman belajar"
                },
                "innovation": {
                    "packaging": {"notes": "", "isAdaptive": true, "isTested": true},
                    "variants": [{"id": "var_1", "name": "Original", "type": "flavor", "isActive": true}]
                },
                "financials": {
                    "projection": {"revenue": 1.0, "breakEvenPoint": 1, "margin": 60.0}
                }
            }),
        )
        .await
        .unwrap();

        let profile = CalculateReadinessHandler::new(store)
            .handle(CalculateReadinessCommand { project_id: id })
            .await
            .unwrap();

        assert_eq!(profile.score.value(), 100);
        assert_eq!(profile.status, ReadinessStatus::Ready);
        assert_eq!(profile.recommendations, vec![REC_EXPLORE_FUNDING]);
    }
}
