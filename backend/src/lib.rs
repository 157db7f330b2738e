//! Venture Planner - Guided business-planning core.
//!
//! Holds one project document per business idea and enriches it step by
//! step: a three-step marketability wizard backed by a text-generation
//! gateway, packaging/variant/feedback flows, a revenue projection and a
//! readiness score. Documents live in a local key-value store and are
//! mirrored to a remote collection when one is reachable.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
