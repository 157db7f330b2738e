//! SavePackagingHandler - Stores packaging notes and logistics checks.

use serde_json::json;
use std::sync::Arc;

use crate::application::handlers::to_partial;
use crate::domain::foundation::{DomainError, ProjectId};
use crate::domain::project::{Packaging, ProjectDocument};
use crate::ports::ProjectRepository;

#[derive(Debug, Clone)]
pub struct SavePackagingCommand {
    pub project_id: ProjectId,
    pub notes: String,
    pub is_adaptive: bool,
    pub is_tested: bool,
}

#[derive(Debug, Clone)]
pub struct SavePackagingResult {
    pub document: ProjectDocument,
    pub is_logistics_ready: bool,
}

pub struct SavePackagingHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl SavePackagingHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: SavePackagingCommand) -> Result<SavePackagingResult, DomainError> {
        let packaging = Packaging::new(cmd.notes, cmd.is_adaptive, cmd.is_tested);
        let partial = json!({ "innovation": { "packaging": to_partial(&packaging)? } });

        let document = self.repository.update(&cmd.project_id, partial).await?;
        let is_logistics_ready = document
            .packaging()
            .is_some_and(|p| p.is_logistics_ready());

        Ok(SavePackagingResult {
            document,
            is_logistics_ready,
        })
    }
}
