//! Financials sub-record: revenue projection and readiness profile.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Percentage, ValidationError};

/// Selling days assumed per month by the projection.
pub const DAYS_PER_MONTH: f64 = 30.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Financials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<Projection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readiness_profile: Option<ReadinessProfile>,
}

/// User inputs for the revenue and cost simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionInput {
    /// Selling price per unit.
    pub price: f64,
    /// Cost per unit.
    pub cost: f64,
    /// Units sold per day.
    pub frequency: f64,
}

/// Derived monthly projection. Never entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    /// Monthly revenue.
    pub revenue: f64,
    /// Units needed to recover one unit's cost.
    pub break_even_point: u64,
    /// Gross margin in percent.
    pub margin: f64,
}

impl Projection {
    /// Runs the simulation.
    ///
    /// # Errors
    ///
    /// Every input must be finite and positive, and the price must exceed
    /// the cost.
    pub fn simulate(input: ProjectionInput) -> Result<Self, ValidationError> {
        for (field, value) in [
            ("price", input.price),
            ("cost", input.cost),
            ("frequency", input.frequency),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ValidationError::invalid_format(
                    field,
                    "must be a positive number",
                ));
            }
        }

        if input.price <= input.cost {
            return Err(ValidationError::BusinessRule(
                "price must be greater than cost".to_string(),
            ));
        }

        let unit_profit = input.price - input.cost;
        Ok(Self {
            revenue: input.price * input.frequency * DAYS_PER_MONTH,
            break_even_point: (input.cost / unit_profit).ceil() as u64,
            margin: unit_profit / input.price * 100.0,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    Ready,
    NeedsWork,
    Incomplete,
}

/// Completeness assessment of a whole project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessProfile {
    pub score: Percentage,
    pub status: ReadinessStatus,
    pub recommendations: Vec<String>,
}
