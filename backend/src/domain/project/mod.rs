//! Project module - The project document aggregate and its sub-records.
//!
//! A [`ProjectDocument`] is created with business fields only and enriched
//! step by step: marketability by the wizard, innovation by the packaging,
//! variant and feedback flows, financials by the projection simulator and
//! the readiness scorer.

mod business;
mod document;
mod financials;
mod innovation;
mod marketability;
mod merge;
mod progress;

pub use business::{Business, BusinessType, MIN_PRODUCTS_LEN};
pub use document::ProjectDocument;
pub use financials::{Financials, Projection, ProjectionInput, ReadinessProfile, ReadinessStatus, DAYS_PER_MONTH};
pub use innovation::{
    suggests_personalization, FeedbackEntry, FeedbackIteration, FeedbackLog, FeedbackSource,
    Innovation, Packaging, Variant, VariantChanges, VariantType, ITERATION_INTERVAL_DAYS,
};
pub use marketability::{Marketability, TargetSegment, RECOMMENDED_SEGMENT_COUNT};
pub use merge::{deep_merge, shallow_merge};
pub use progress::{module_progress, ModuleProgress, ModuleStatus};
