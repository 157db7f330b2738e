//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types and the state machine
//! trait that form the vocabulary of the planning domain.

mod errors;
mod ids;
mod percentage;
mod rating;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{FeedbackId, IterationId, ProjectId, VariantId};
pub use percentage::Percentage;
pub use rating::FeedbackRating;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
