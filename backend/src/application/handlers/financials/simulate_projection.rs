//! SimulateProjectionHandler - Revenue and cost simulation.

use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::application::handlers::to_partial;
use crate::domain::foundation::{DomainError, ProjectId};
use crate::domain::project::{ProjectDocument, Projection, ProjectionInput};
use crate::ports::ProjectRepository;

#[derive(Debug, Clone)]
pub struct SimulateProjectionCommand {
    pub project_id: ProjectId,
    pub price: f64,
    pub cost: f64,
    /// Units sold per day.
    pub frequency: f64,
}

#[derive(Debug, Clone)]
pub struct SimulateProjectionResult {
    pub document: ProjectDocument,
    pub projection: Projection,
}

pub struct SimulateProjectionHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl SimulateProjectionHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    /// Runs the simulation and stores the projection.
    ///
    /// Invalid inputs (including price not above cost) are rejected before
    /// anything is written.
    pub async fn handle(
        &self,
        cmd: SimulateProjectionCommand,
    ) -> Result<SimulateProjectionResult, DomainError> {
        let projection = Projection::simulate(ProjectionInput {
            price: cmd.price,
            cost: cmd.cost,
            frequency: cmd.frequency,
        })?;

        let partial = json!({ "financials": { "projection": to_partial(&projection)? } });
        let document = self.repository.update(&cmd.project_id, partial).await?;

        info!(
            project_id = %cmd.project_id,
            margin = projection.margin,
            "Projection simulated"
        );
        Ok(SimulateProjectionResult {
            document,
            projection,
        })
    }
}
