//! Application layer - Command handlers, queries and the marketability wizard.
//!
//! This layer orchestrates domain operations over the ports. Handlers take
//! their ports as `Arc<dyn ...>` and never touch adapters directly.

pub mod handlers;
pub mod wizard;

pub use handlers::{
    // Project
    CreateProjectCommand, CreateProjectHandler, DeleteProjectCommand, DeleteProjectHandler,
    GetProjectHandler, GetProjectOverviewHandler, GetProjectQuery, ListProjectsHandler,
    ProjectOverview,
    // Innovation
    AddFeedbackCommand, AddVariantCommand, FeedbackLoopHandler, FeedbackLoopView,
    RemoveVariantCommand, SavePackagingCommand, SavePackagingHandler, SavePackagingResult,
    UpdateVariantCommand, VariantsHandler,
    // Financials
    CalculateReadinessCommand, CalculateReadinessHandler, SimulateProjectionCommand,
    SimulateProjectionHandler, SimulateProjectionResult,
};
pub use wizard::{MarketabilityWizard, StrategyEdits, TransitionOutcome, WizardStatus};
