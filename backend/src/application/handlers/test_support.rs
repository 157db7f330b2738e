//! Shared fixtures for handler tests.

use std::sync::Arc;

use crate::adapters::storage::{InMemoryLocalStorage, ProjectRecordStore};
use crate::domain::foundation::ProjectId;
use crate::domain::project::{Business, BusinessType, ProjectDocument};
use crate::ports::ProjectRepository;

pub(crate) fn store() -> Arc<ProjectRecordStore> {
    Arc::new(ProjectRecordStore::new(Arc::new(InMemoryLocalStorage::new())))
}

pub(crate) fn document() -> ProjectDocument {
    ProjectDocument::new(
        ProjectId::new(),
        Business::new(
            "Kopi Kita",
            BusinessType::FoodAndBeverage,
            "Cold brew coffee bottles",
            None,
        )
        .unwrap(),
    )
}

/// A store holding one fresh project.
pub(crate) async fn seeded() -> (Arc<ProjectRecordStore>, ProjectId) {
    let store = store();
    let created = store.create(document()).await.unwrap();
    (store, created.id)
}
