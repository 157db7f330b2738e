//! Analysis module - Pure domain services over the project document.

mod readiness;

pub use readiness::{
    ReadinessScorer, REC_COMPLETE_MARKETABILITY, REC_EXPLORE_FUNDING, REC_ADD_VARIANT,
    REC_IMPROVE_MARGIN, REC_RUN_PROJECTION,
};
