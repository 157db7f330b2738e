//! Whole-number percentages, used for readiness scores.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 0..=100. Construction and accumulation both saturate at 100, so a score
/// built from point awards can never leave the range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    pub const ZERO: Self = Self(0);
    pub const FULL: Self = Self(100);

    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Adds `points`, saturating at 100.
    #[must_use]
    pub fn award(self, points: u8) -> Self {
        Self::new(self.0.saturating_add(points))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
