//! Marketability sub-record populated by the segmentation wizard.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Number of target segments the targeting step must produce.
pub const RECOMMENDED_SEGMENT_COUNT: usize = 2;

/// A recommended target segment with the reason it was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSegment {
    pub segment: String,
    pub reason: String,
}

impl TargetSegment {
    pub fn new(segment: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            segment: segment.into(),
            reason: reason.into(),
        }
    }
}

/// Output of the three wizard steps.
///
/// `recommended_segments` is a fixed pair: a stored list of any other
/// non-zero length is rejected at deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Marketability {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub market_segments: Vec<String>,

    #[serde(
        deserialize_with = "deserialize_segment_pair",
        skip_serializing_if = "Option::is_none"
    )]
    pub recommended_segments: Option<[TargetSegment; RECOMMENDED_SEGMENT_COUNT]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub niche_suggestion: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub positioning_statement: Option<String>,
}

impl Marketability {
    /// Returns the niche suggestion if present and non-blank.
    pub fn niche(&self) -> Option<&str> {
        non_blank(self.niche_suggestion.as_deref())
    }

    /// Returns the positioning statement if present and non-blank.
    pub fn positioning(&self) -> Option<&str> {
        non_blank(self.positioning_statement.as_deref())
    }

    /// Both positioning outputs are filled in.
    pub fn is_positioned(&self) -> bool {
        self.niche().is_some() && self.positioning().is_some()
    }

    /// Names of the recommended segments, in order.
    pub fn selected_segment_names(&self) -> Vec<String> {
        self.recommended_segments
            .as_ref()
            .map(|pair| pair.iter().map(|t| t.segment.clone()).collect())
            .unwrap_or_default()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn deserialize_segment_pair<'de, D>(
    deserializer: D,
) -> Result<Option<[TargetSegment; RECOMMENDED_SEGMENT_COUNT]>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<TargetSegment>> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(list) if list.is_empty() => Ok(None),
        Some(list) => <[TargetSegment; RECOMMENDED_SEGMENT_COUNT]>::try_from(list)
            .map(Some)
            .map_err(|list| de::Error::invalid_length(list.len(), &"exactly 2 recommended segments")),
    }
}
