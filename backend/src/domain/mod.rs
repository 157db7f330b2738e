//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `project` - The project document, its sub-records and merge policy
//! - `wizard` - Marketability wizard steps and step derivation
//! - `analysis` - Pure scoring over the whole project document

pub mod analysis;
pub mod foundation;
pub mod project;
pub mod wizard;
