//! WizardStep - the marketability wizard's states.
//!
//! The current step is never stored. It is derived from which outputs the
//! document already holds, so a reload after a crash resumes where the
//! persisted data says the user is.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;
use crate::domain::project::ProjectDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Segmentation = 1,
    Targeting = 2,
    Positioning = 3,
    Complete = 4,
}

impl WizardStep {
    /// Derives the step from document content.
    pub fn derive(doc: &ProjectDocument) -> Self {
        if doc.niche_suggestion().is_some() {
            WizardStep::Complete
        } else if doc.recommended_segments().is_some() {
            WizardStep::Positioning
        } else if !doc.market_segments().is_empty() {
            WizardStep::Targeting
        } else {
            WizardStep::Segmentation
        }
    }

    /// 1-based position in the flow.
    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Segmentation => "Segmentation",
            WizardStep::Targeting => "Targeting",
            WizardStep::Positioning => "Positioning",
            WizardStep::Complete => "Complete",
        }
    }

}

impl StateMachine for WizardStep {
    fn successor(&self) -> Option<Self> {
        match self {
            WizardStep::Segmentation => Some(WizardStep::Targeting),
            WizardStep::Targeting => Some(WizardStep::Positioning),
            WizardStep::Positioning => Some(WizardStep::Complete),
            WizardStep::Complete => None,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
