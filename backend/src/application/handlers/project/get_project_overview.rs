//! GetProjectOverviewHandler - Per-module progress of one project.

use serde::Serialize;
use std::sync::Arc;

use super::GetProjectQuery;
use crate::domain::analysis::ReadinessScorer;
use crate::domain::foundation::{DomainError, ProjectId};
use crate::domain::project::{module_progress, BusinessType, ModuleProgress, ReadinessProfile};
use crate::domain::wizard::WizardStep;
use crate::ports::ProjectRepository;

/// Dashboard view of a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOverview {
    pub project_id: ProjectId,
    pub business_name: String,
    pub business_type: BusinessType,
    pub progress: ModuleProgress,
    pub wizard_step: WizardStep,
    /// Scored from the current document, not read from storage.
    pub readiness: ReadinessProfile,
}

pub struct GetProjectOverviewHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl GetProjectOverviewHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetProjectQuery) -> Result<ProjectOverview, DomainError> {
        let document = self.repository.get(&query.project_id).await?;

        Ok(ProjectOverview {
            progress: module_progress(&document),
            wizard_step: WizardStep::derive(&document),
            readiness: ReadinessScorer::score(&document),
            business_name: document.business.name,
            business_type: document.business.business_type,
            project_id: document.id,
        })
    }
}
