//! Generation Gateway Port - The three suggestion operations.
//!
//! Each operation is a pure request → response call against an external
//! text-generation capability. Responses are checked against a fixed shape
//! before a caller may accept them; anything out of contract is a
//! [`GenerationError`] and never a partial result.
//!
//! # Wire Shapes
//!
//! | Operation | Request | Response |
//! |-----------|---------|----------|
//! | discover segments | `{businessType, products}` | `{marketSegments: string[]}` |
//! | recommend targets | `{businessType, productsSold, marketSegments}` | `{recommendedSegments: [{segment, reason}] x2}` |
//! | synthesize positioning | `{businessName, businessType, productsSold, selectedMarketSegments}` | `{nicheSuggestion, positioningStatement}` |

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;
use crate::domain::project::{BusinessType, TargetSegment, RECOMMENDED_SEGMENT_COUNT};

/// Segment count the discovery prompt asks for. Not enforced.
pub const SUGGESTED_MIN_SEGMENTS: usize = 3;

/// Port for the suggestion operations.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Step 1: potential market segments for a business.
    async fn discover_segments(
        &self,
        request: SegmentDiscoveryRequest,
    ) -> Result<SegmentDiscovery, GenerationError>;

    /// Step 2: the two best segments to target, with reasons.
    async fn recommend_targets(
        &self,
        request: TargetRecommendationRequest,
    ) -> Result<TargetRecommendation, GenerationError>;

    /// Step 3: niche and positioning statement for the chosen segments.
    async fn synthesize_positioning(
        &self,
        request: PositioningRequest,
    ) -> Result<PositioningSuggestion, GenerationError>;
}

// ─── Requests ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentDiscoveryRequest {
    pub business_type: BusinessType,
    pub products: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetRecommendationRequest {
    pub business_type: BusinessType,
    pub products_sold: String,
    pub market_segments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositioningRequest {
    pub business_name: String,
    pub business_type: BusinessType,
    pub products_sold: String,
    pub selected_market_segments: Vec<String>,
}

// ─── Responses ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentDiscovery {
    pub market_segments: Vec<String>,
}

impl SegmentDiscovery {
    /// Trims entries, drops blanks and requires at least one segment.
    pub fn validated(self) -> Result<Self, GenerationError> {
        let market_segments: Vec<String> = self
            .market_segments
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if market_segments.is_empty() {
            return Err(GenerationError::contract("marketSegments is empty"));
        }
        Ok(Self { market_segments })
    }
}

/// Targeting result as received. Use [`TargetRecommendation::into_pair`]
/// to accept it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetRecommendation {
    pub recommended_segments: Vec<TargetSegment>,
}

impl TargetRecommendation {
    /// Accepts the response only if it holds exactly two complete entries.
    pub fn into_pair(self) -> Result<[TargetSegment; RECOMMENDED_SEGMENT_COUNT], GenerationError> {
        let count = self.recommended_segments.len();
        let pair: [TargetSegment; RECOMMENDED_SEGMENT_COUNT] = self
            .recommended_segments
            .try_into()
            .map_err(|_| {
                GenerationError::contract(format!(
                    "expected exactly {} recommended segments, got {}",
                    RECOMMENDED_SEGMENT_COUNT, count
                ))
            })?;
        if pair.iter().any(|t| t.segment.trim().is_empty()) {
            return Err(GenerationError::contract("recommended segment name is blank"));
        }
        Ok(pair)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositioningSuggestion {
    pub niche_suggestion: String,
    pub positioning_statement: String,
}

impl PositioningSuggestion {
    /// Requires both texts to be non-blank.
    pub fn validated(self) -> Result<Self, GenerationError> {
        if self.niche_suggestion.trim().is_empty() {
            return Err(GenerationError::contract("nicheSuggestion is blank"));
        }
        if self.positioning_statement.trim().is_empty() {
            return Err(GenerationError::contract("positioningStatement is blank"));
        }
        Ok(self)
    }
}

// ─── Errors ─────────────────────────────────────────────────────────────────

/// Terminal failure of one gateway call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// The text provider failed (network, auth, rate limit, outage).
    #[error("generation provider failed: {0}")]
    Provider(String),

    /// The call exceeded its deadline.
    #[error("generation timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Response could not be parsed into the expected shape.
    #[error("malformed generation response: {0}")]
    MalformedResponse(String),

    /// Response parsed but broke the contract (counts, blanks).
    #[error("generation response out of contract: {0}")]
    ContractViolation(String),
}

impl GenerationError {
    /// Creates a provider error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }

    /// Creates a malformed response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Creates a contract violation error.
    pub fn contract(message: impl Into<String>) -> Self {
        Self::ContractViolation(message.into())
    }
}

impl From<GenerationError> for DomainError {
    fn from(err: GenerationError) -> Self {
        DomainError::generation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use serde_json::json;

    fn targets(n: usize) -> TargetRecommendation {
        TargetRecommendation {
            recommended_segments: (0..n)
                .map(|i| TargetSegment::new(format!("Segment {}", i), "reason"))
                .collect(),
        }
    }

    #[test]
    fn requests_use_original_field_names() {
        let request = PositioningRequest {
            business_name: "Kopi Kita".into(),
            business_type: BusinessType::FoodAndBeverage,
            products_sold: "Cold brew".into(),
            selected_market_segments: vec!["Students".into()],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "businessName": "Kopi Kita",
                "businessType": "F&B",
                "productsSold": "Cold brew",
                "selectedMarketSegments": ["Students"]
            })
        );
    }

    #[test]
    fn exactly_two_targets_are_accepted() {
        let pair = targets(2).into_pair().unwrap();
        assert_eq!(pair[1].segment, "Segment 1");
    }

    #[test]
    fn one_or_three_targets_are_rejected() {
        for n in [0, 1, 3] {
            let err = targets(n).into_pair().unwrap_err();
            assert!(matches!(err, GenerationError::ContractViolation(_)), "n = {}", n);
        }
    }

    #[test]
    fn blank_target_name_is_rejected() {
        let rec = TargetRecommendation {
            recommended_segments: vec![TargetSegment::new(" ", "r"), TargetSegment::new("b", "r")],
        };
        assert!(rec.into_pair().is_err());
    }

    #[test]
    fn discovery_drops_blank_entries() {
        let discovery = SegmentDiscovery {
            market_segments: vec![" Mahasiswa ".into(), "".into(), "Keluarga".into()],
        }
        .validated()
        .unwrap();
        assert_eq!(discovery.market_segments, vec!["Mahasiswa", "Keluarga"]);
    }

    #[test]
    fn empty_discovery_is_rejected() {
        let err = SegmentDiscovery {
            market_segments: vec!["  ".into()],
        }
        .validated()
        .unwrap_err();
        assert!(matches!(err, GenerationError::ContractViolation(_)));
    }

    #[test]
    fn blank_positioning_is_rejected() {
        let suggestion = PositioningSuggestion {
            niche_suggestion: "Niche".into(),
            positioning_statement: "".into(),
        };
        assert!(suggestion.validated().is_err());
    }

    #[test]
    fn converts_to_generation_failure() {
        let err: DomainError = GenerationError::Timeout { timeout_secs: 30 }.into();
        assert_eq!(err.code, ErrorCode::GenerationFailure);
    }
}
