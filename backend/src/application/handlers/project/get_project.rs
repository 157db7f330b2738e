//! GetProjectHandler - Query handler for loading one project.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ProjectId};
use crate::domain::project::ProjectDocument;
use crate::ports::ProjectRepository;

#[derive(Debug, Clone)]
pub struct GetProjectQuery {
    pub project_id: ProjectId,
}

pub struct GetProjectHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl GetProjectHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetProjectQuery) -> Result<ProjectDocument, DomainError> {
        self.repository.get(&query.project_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{seeded, store};
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn returns_stored_project() {
        let (store, id) = seeded().await;
        let handler = GetProjectHandler::new(store);

        let doc = handler.handle(GetProjectQuery { project_id: id.clone() }).await.unwrap();
        assert_eq!(doc.id, id);
    }

    #[tokio::test]
    async fn unknown_project_is_not_found() {
        let handler = GetProjectHandler::new(store());
        let err = handler
            .handle(GetProjectQuery { project_id: ProjectId::new() })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProjectNotFound);
    }
}
