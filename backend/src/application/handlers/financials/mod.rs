//! Financial handlers: revenue projection and readiness scoring.

mod calculate_readiness;
mod simulate_projection;

pub use calculate_readiness::{CalculateReadinessCommand, CalculateReadinessHandler};
pub use simulate_projection::{
    SimulateProjectionCommand, SimulateProjectionHandler, SimulateProjectionResult,
};
