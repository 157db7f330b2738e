//! Readiness Scorer - completeness score and recommendations for a project.

use crate::domain::foundation::Percentage;
use crate::domain::project::{ProjectDocument, ReadinessProfile, ReadinessStatus};

pub const MARKETABILITY_POINTS: u8 = 35;
pub const LOGISTICS_POINTS: u8 = 15;
pub const VARIANT_POINTS: u8 = 15;
pub const HEALTHY_MARGIN_POINTS: u8 = 35;
pub const THIN_MARGIN_POINTS: u8 = 20;

/// Margin (percent) above which the projection earns full points.
pub const HEALTHY_MARGIN_THRESHOLD: f64 = 20.0;

/// Score above which a project is ready.
pub const READY_THRESHOLD: u8 = 70;
/// Score above which a project needs work rather than being incomplete.
pub const NEEDS_WORK_THRESHOLD: u8 = 30;

pub const REC_COMPLETE_MARKETABILITY: &str =
    "Complete Marketability analysis for a clearer strategy.";
pub const REC_ADD_VARIANT: &str = "Add at least one product variant to diversify your offering.";
pub const REC_IMPROVE_MARGIN: &str = "Try to improve your profit margin above 20%.";
pub const REC_RUN_PROJECTION: &str = "Run the Revenue & Cost simulation.";
pub const REC_EXPLORE_FUNDING: &str =
    "Your business profile looks solid! Consider exploring funding options.";

/// Scorer for project readiness.
pub struct ReadinessScorer;

impl ReadinessScorer {
    /// Scores a document.
    ///
    /// Deterministic and side-effect free; only marketability, packaging,
    /// variants and projection influence the result. A `Ready` profile
    /// always carries at least one recommendation.
    pub fn score(doc: &ProjectDocument) -> ReadinessProfile {
        let mut score = Percentage::ZERO;
        let mut recommendations = Vec::new();

        let positioned = doc
            .marketability
            .as_ref()
            .is_some_and(|m| m.is_positioned());
        if positioned {
            score = score.award(MARKETABILITY_POINTS);
        } else {
            recommendations.push(REC_COMPLETE_MARKETABILITY.to_string());
        }

        if doc.packaging().is_some_and(|p| p.is_logistics_ready()) {
            score = score.award(LOGISTICS_POINTS);
        }

        if doc.variants().is_empty() {
            recommendations.push(REC_ADD_VARIANT.to_string());
        } else {
            score = score.award(VARIANT_POINTS);
        }

        match doc.projection() {
            Some(projection) if projection.margin > HEALTHY_MARGIN_THRESHOLD => {
                score = score.award(HEALTHY_MARGIN_POINTS);
            }
            Some(_) => {
                score = score.award(THIN_MARGIN_POINTS);
                recommendations.push(REC_IMPROVE_MARGIN.to_string());
            }
            None => recommendations.push(REC_RUN_PROJECTION.to_string()),
        }

        let status = Self::status_for(score.value());
        if status == ReadinessStatus::Ready && recommendations.is_empty() {
            recommendations.push(REC_EXPLORE_FUNDING.to_string());
        }

        ReadinessProfile {
            score,
            status,
            recommendations,
        }
    }

    /// Maps a score to its status band.
    pub fn status_for(score: u8) -> ReadinessStatus {
        if score > READY_THRESHOLD {
            ReadinessStatus::Ready
        } else if score > NEEDS_WORK_THRESHOLD {
            ReadinessStatus::NeedsWork
        } else {
            ReadinessStatus::Incomplete
        }
    }
}
