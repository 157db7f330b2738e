//! VariantsHandler - Add, edit and remove product variants.
//!
//! Every command is a read-modify-write of the whole variant list; the
//! list is replaced wholesale by the partial update.

use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::application::handlers::to_partial;
use crate::domain::foundation::{DomainError, ProjectId, VariantId};
use crate::domain::project::{
    suggests_personalization, ProjectDocument, Variant, VariantChanges, VariantType,
};
use crate::ports::ProjectRepository;

#[derive(Debug, Clone)]
pub struct AddVariantCommand {
    pub project_id: ProjectId,
    pub name: String,
    pub variant_type: VariantType,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateVariantCommand {
    pub project_id: ProjectId,
    pub variant_id: VariantId,
    pub changes: VariantChanges,
}

#[derive(Debug, Clone)]
pub struct RemoveVariantCommand {
    pub project_id: ProjectId,
    pub variant_id: VariantId,
}

pub struct VariantsHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl VariantsHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    pub async fn add(&self, cmd: AddVariantCommand) -> Result<ProjectDocument, DomainError> {
        let variant = Variant::new(cmd.name, cmd.variant_type, cmd.is_active)?;
        let document = self.repository.get(&cmd.project_id).await?;

        let mut variants = document.variants().to_vec();
        info!(project_id = %cmd.project_id, variant_id = %variant.id, "Variant added");
        variants.push(variant);
        self.store(&cmd.project_id, &variants).await
    }

    pub async fn update(&self, cmd: UpdateVariantCommand) -> Result<ProjectDocument, DomainError> {
        let document = self.repository.get(&cmd.project_id).await?;
        let mut variants = document.variants().to_vec();

        let slot = variants
            .iter_mut()
            .find(|v| v.id == cmd.variant_id)
            .ok_or_else(|| unknown_variant(&cmd.variant_id))?;
        *slot = slot.apply(cmd.changes)?;

        self.store(&cmd.project_id, &variants).await
    }

    pub async fn remove(&self, cmd: RemoveVariantCommand) -> Result<ProjectDocument, DomainError> {
        let document = self.repository.get(&cmd.project_id).await?;
        let mut variants = document.variants().to_vec();

        let before = variants.len();
        variants.retain(|v| v.id != cmd.variant_id);
        if variants.len() == before {
            return Err(unknown_variant(&cmd.variant_id));
        }

        self.store(&cmd.project_id, &variants).await
    }

    /// Whether the chosen target segments call for a personalization variant.
    pub async fn personalization_hint(&self, project_id: &ProjectId) -> Result<bool, DomainError> {
        let document = self.repository.get(project_id).await?;
        let selected = document
            .marketability
            .as_ref()
            .map(|m| m.selected_segment_names())
            .unwrap_or_default();
        Ok(suggests_personalization(&selected))
    }

    async fn store(
        &self,
        project_id: &ProjectId,
        variants: &[Variant],
    ) -> Result<ProjectDocument, DomainError> {
        let partial = json!({ "innovation": { "variants": to_partial(&variants)? } });
        self.repository.update(project_id, partial).await
    }
}

fn unknown_variant(id: &VariantId) -> DomainError {
    DomainError::validation("variant.id", format!("No variant with id '{}'", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::seeded;
    use crate::domain::foundation::ErrorCode;

    fn add(project_id: &ProjectId, name: &str) -> AddVariantCommand {
        AddVariantCommand {
            project_id: project_id.clone(),
            name: name.into(),
            variant_type: VariantType::Flavor,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn add_update_remove_round() {
        let (store, id) = seeded().await;
        let handler = VariantsHandler::new(store.clone());

        handler.add(add(&id, "Original")).await.unwrap();
        let doc = handler.add(add(&id, "Aren")).await.unwrap();
        assert_eq!(doc.variants().len(), 2);
        let aren = doc.variants()[1].id.clone();

        let doc = handler
            .update(UpdateVariantCommand {
                project_id: id.clone(),
                variant_id: aren.clone(),
                changes: VariantChanges {
                    variant_type: Some(VariantType::Size),
                    is_active: Some(false),
                    ..Default::default()
                },
            })
            .await
            .unwrap();
        let edited = &doc.variants()[1];
        assert_eq!(edited.name, "Aren");
        assert_eq!(edited.variant_type, VariantType::Size);
        assert!(!edited.is_active);

        let doc = handler
            .remove(RemoveVariantCommand {
                project_id: id.clone(),
                variant_id: aren,
            })
            .await
            .unwrap();
        assert_eq!(doc.variants().len(), 1);
        assert_eq!(store.get(&id).await.unwrap().variants()[0].name, "Original");
    }

    #[tokio::test]
    async fn blank_name_is_rejected_without_write() {
        let (store, id) = seeded().await;
        let before = store.get(&id).await.unwrap();

        let err = VariantsHandler::new(store.clone())
            .add(add(&id, "   "))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(store.get(&id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn unknown_variant_is_rejected() {
        let (store, id) = seeded().await;
        let err = VariantsHandler::new(store)
            .remove(RemoveVariantCommand {
                project_id: id,
                variant_id: VariantId::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn family_target_suggests_personalization() {
        let (store, id) = seeded().await;
        let handler = VariantsHandler::new(store.clone());
        assert!(!handler.personalization_hint(&id).await.unwrap());

        ProjectRepository::update(
            store.as_ref(),
            &id,
            json!({ "marketability": { "recommendedSegments": [
                {"segment": "Keluarga", "reason": "a"},
                {"segment": "Mahasiswa", "reason": "b"}
            ] } }),
        )
        .await
        .unwrap();

        assert!(handler.personalization_hint(&id).await.unwrap());
    }
}
