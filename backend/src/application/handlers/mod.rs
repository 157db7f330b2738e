//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations over the
//! `ProjectRepository` port.

pub mod financials;
pub mod innovation;
pub mod project;

#[cfg(test)]
pub(crate) mod test_support;

use serde::Serialize;
use serde_json::Value;

use crate::domain::foundation::{DomainError, ErrorCode};

pub use financials::{
    CalculateReadinessCommand, CalculateReadinessHandler, SimulateProjectionCommand,
    SimulateProjectionHandler, SimulateProjectionResult,
};
pub use innovation::{
    AddFeedbackCommand, AddVariantCommand, FeedbackLoopHandler, FeedbackLoopView,
    RemoveVariantCommand, SavePackagingCommand, SavePackagingHandler, SavePackagingResult,
    UpdateVariantCommand, VariantsHandler,
};
pub use project::{
    CreateProjectCommand, CreateProjectHandler, DeleteProjectCommand, DeleteProjectHandler,
    GetProjectHandler, GetProjectOverviewHandler, GetProjectQuery, ListProjectsHandler,
    ProjectOverview,
};

/// Serializes a sub-record into the JSON fragment of a partial update.
pub(crate) fn to_partial<T: Serialize>(value: &T) -> Result<Value, DomainError> {
    serde_json::to_value(value).map_err(|e| {
        DomainError::new(
            ErrorCode::SerializationFailed,
            format!("Failed to serialize partial update: {}", e),
        )
    })
}
