//! CreateProjectHandler - Command handler for starting a new project.

use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{DomainError, ProjectId};
use crate::domain::project::{Business, BusinessType, ProjectDocument};
use crate::ports::ProjectRepository;

/// Command to create a project from the new-project form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectCommand {
    pub business_name: String,
    /// Business type label, e.g. `F&B`.
    pub business_type: String,
    pub products: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Handler for creating projects.
pub struct CreateProjectHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl CreateProjectHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateProjectCommand) -> Result<ProjectDocument, DomainError> {
        // 1. Validate input before any write
        let business_type = BusinessType::parse(&cmd.business_type)?;
        let business = Business::new(cmd.business_name, business_type, cmd.products, cmd.description)?;

        // 2. Create with empty sub-records
        let document = ProjectDocument::new(ProjectId::new(), business);

        // 3. Persist
        let created = self.repository.create(document).await?;

        info!(
            project_id = %created.id,
            business_type = %created.business.business_type,
            "Project created"
        );
        Ok(created)
    }
}
