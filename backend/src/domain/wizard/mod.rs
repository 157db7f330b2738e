//! Wizard module - The linear segmentation → targeting → positioning flow.

mod step;

pub use step::WizardStep;
