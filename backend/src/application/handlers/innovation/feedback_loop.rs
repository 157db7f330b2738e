//! FeedbackLoopHandler - Customer feedback rounds and iteration history.

use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::application::handlers::to_partial;
use crate::domain::foundation::{DomainError, ProjectId, Timestamp, ValidationError};
use crate::domain::project::{FeedbackEntry, FeedbackLog, FeedbackSource, ProjectDocument};
use crate::ports::ProjectRepository;

#[derive(Debug, Clone)]
pub struct AddFeedbackCommand {
    pub project_id: ProjectId,
    pub source: FeedbackSource,
    pub comment: String,
    /// 1 to 5.
    pub rating: u8,
}

/// Feedback log plus the iteration schedule derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackLoopView {
    pub feedback: FeedbackLog,
    pub last_iteration_date: Option<Timestamp>,
    pub recommended_next_iteration: Timestamp,
}

impl FeedbackLoopView {
    fn of(feedback: FeedbackLog, now: Timestamp) -> Self {
        Self {
            last_iteration_date: feedback.last_iteration_date(),
            recommended_next_iteration: feedback.recommended_next_iteration(now),
            feedback,
        }
    }
}

pub struct FeedbackLoopHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl FeedbackLoopHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    pub async fn view(&self, project_id: &ProjectId) -> Result<FeedbackLoopView, DomainError> {
        let document = self.repository.get(project_id).await?;
        Ok(FeedbackLoopView::of(document.feedback(), Timestamp::now()))
    }

    /// Adds an entry at the head of the current round.
    pub async fn add_feedback(&self, cmd: AddFeedbackCommand) -> Result<FeedbackLoopView, DomainError> {
        let now = Timestamp::now();
        let entry = FeedbackEntry::new(cmd.source, cmd.comment, cmd.rating, now)?;

        let document = self.repository.get(&cmd.project_id).await?;
        let feedback = document.feedback().with_feedback(entry)?;

        let stored = self.store(&cmd.project_id, &feedback).await?;
        Ok(FeedbackLoopView::of(stored.feedback(), now))
    }

    /// Closes the current round into the iteration history.
    ///
    /// Requires at least one entry in the current round.
    pub async fn start_new_iteration(
        &self,
        project_id: &ProjectId,
    ) -> Result<FeedbackLoopView, DomainError> {
        let now = Timestamp::now();
        let document = self.repository.get(project_id).await?;
        let current = document.feedback();
        if current.current_feedbacks.is_empty() {
            return Err(ValidationError::empty_field("feedback.currentFeedbacks").into());
        }

        let feedback = current.start_new_iteration(now);
        let stored = self.store(project_id, &feedback).await?;
        info!(
            project_id = %project_id,
            iterations = stored.feedback().iterations.len(),
            "Feedback iteration closed"
        );
        Ok(FeedbackLoopView::of(stored.feedback(), now))
    }

    async fn store(
        &self,
        project_id: &ProjectId,
        feedback: &FeedbackLog,
    ) -> Result<ProjectDocument, DomainError> {
        let partial = json!({ "innovation": { "feedback": to_partial(feedback)? } });
        self.repository.update(project_id, partial).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::seeded;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::project::ITERATION_INTERVAL_DAYS;

    fn feedback(project_id: &ProjectId, comment: &str, rating: u8) -> AddFeedbackCommand {
        AddFeedbackCommand {
            project_id: project_id.clone(),
            source: FeedbackSource::Marketplace,
            comment: comment.into(),
            rating,
        }
    }

    #[tokio::test]
    async fn newest_feedback_comes_first() {
        let (store, id) = seeded().await;
        let handler = FeedbackLoopHandler::new(store);

        handler.add_feedback(feedback(&id, "Enak", 5)).await.unwrap();
        let view = handler.add_feedback(feedback(&id, "Terlalu manis", 3)).await.unwrap();

        let comments: Vec<&str> = view
            .feedback
            .current_feedbacks
            .iter()
            .map(|f| f.comment.as_str())
            .collect();
        assert_eq!(comments, vec!["Terlalu manis", "Enak"]);
    }

    #[tokio::test]
    async fn rating_out_of_range_is_rejected() {
        let (store, id) = seeded().await;
        let handler = FeedbackLoopHandler::new(store);
        for rating in [0, 6] {
            let err = handler.add_feedback(feedback(&id, "Hmm", rating)).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationFailed);
        }
    }

    #[tokio::test]
    async fn new_iteration_snapshots_and_clears_current() {
        let (store, id) = seeded().await;
        let handler = FeedbackLoopHandler::new(store);
        handler.add_feedback(feedback(&id, "Enak", 5)).await.unwrap();

        let view = handler.start_new_iteration(&id).await.unwrap();

        assert!(view.feedback.current_feedbacks.is_empty());
        assert_eq!(view.feedback.iterations.len(), 1);
        assert_eq!(view.feedback.iterations[0].feedbacks()[0].comment, "Enak");
        let last = view.last_iteration_date.unwrap();
        assert_eq!(
            view.recommended_next_iteration,
            last.add_days(ITERATION_INTERVAL_DAYS)
        );
    }

    #[tokio::test]
    async fn empty_round_cannot_be_closed() {
        let (store, id) = seeded().await;
        let err = FeedbackLoopHandler::new(store)
            .start_new_iteration(&id)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn schedule_without_history_starts_from_now() {
        let (store, id) = seeded().await;
        let before = Timestamp::now();
        let view = FeedbackLoopHandler::new(store).view(&id).await.unwrap();
        assert!(view.last_iteration_date.is_none());
        assert!(!view.recommended_next_iteration.is_before(&before.add_days(ITERATION_INTERVAL_DAYS)));
    }
}
