//! DeleteProjectHandler - Command handler for the explicit delete operation.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{DomainError, ProjectId};
use crate::ports::ProjectRepository;

#[derive(Debug, Clone)]
pub struct DeleteProjectCommand {
    pub project_id: ProjectId,
}

pub struct DeleteProjectHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl DeleteProjectHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteProjectCommand) -> Result<(), DomainError> {
        self.repository.delete(&cmd.project_id).await?;
        info!(project_id = %cmd.project_id, "Project deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::seeded;
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn deleted_project_is_gone() {
        let (store, id) = seeded().await;
        let handler = DeleteProjectHandler::new(store.clone());

        handler
            .handle(DeleteProjectCommand { project_id: id.clone() })
            .await
            .unwrap();

        assert_eq!(store.get(&id).await.unwrap_err().code, ErrorCode::ProjectNotFound);
    }
}
