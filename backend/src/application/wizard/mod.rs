//! Wizard module - Application service for the marketability wizard.

mod marketability_wizard;

pub use marketability_wizard::{
    MarketabilityWizard, StepToken, StrategyEdits, TransitionOutcome, WizardStatus,
};
