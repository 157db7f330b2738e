//! ListProjectsHandler - Query handler for the project list.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::project::ProjectDocument;
use crate::ports::ProjectRepository;

pub struct ListProjectsHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl ListProjectsHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    /// All readable projects, ordered by business name.
    pub async fn handle(&self) -> Result<Vec<ProjectDocument>, DomainError> {
        let mut projects = self.repository.list().await?;
        projects.sort_by(|a, b| a.business.name.cmp(&b.business.name));
        Ok(projects)
    }
}
