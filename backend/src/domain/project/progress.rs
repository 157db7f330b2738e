//! Per-module completion overview of a project.

use serde::Serialize;

use super::ProjectDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleStatus {
    Complete,
    Pending,
}

impl ModuleStatus {
    fn from_flag(done: bool) -> Self {
        if done {
            ModuleStatus::Complete
        } else {
            ModuleStatus::Pending
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleProgress {
    pub marketability: ModuleStatus,
    pub innovation: ModuleStatus,
    pub financials: ModuleStatus,
}

/// Marketability is complete once a niche is set, innovation once a variant
/// exists, financials once a projection has been run.
pub fn module_progress(doc: &ProjectDocument) -> ModuleProgress {
    ModuleProgress {
        marketability: ModuleStatus::from_flag(doc.niche_suggestion().is_some()),
        innovation: ModuleStatus::from_flag(!doc.variants().is_empty()),
        financials: ModuleStatus::from_flag(doc.projection().is_some()),
    }
}
