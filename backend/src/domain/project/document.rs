//! ProjectDocument - root aggregate of one planning project.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{DomainError, ErrorCode, ProjectId, ValidationError};

use super::{
    deep_merge, Business, FeedbackLog, Financials, Innovation, Marketability, Packaging,
    Projection, TargetSegment, Variant, RECOMMENDED_SEGMENT_COUNT,
};

/// The full persisted record of one project.
///
/// Sub-records are optional and filled in incrementally. Missing fields in
/// stored data read as absent rather than as corruption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    pub id: ProjectId,
    #[serde(default)]
    pub business: Business,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketability: Option<Marketability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub innovation: Option<Innovation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financials: Option<Financials>,
}

impl ProjectDocument {
    /// Creates a fresh project with empty sub-records.
    pub fn new(id: ProjectId, business: Business) -> Self {
        Self {
            id,
            business,
            marketability: Some(Marketability::default()),
            innovation: Some(Innovation::default()),
            financials: Some(Financials::default()),
        }
    }

    /// Converts the document into its JSON tree.
    pub fn to_value(&self) -> Result<Value, DomainError> {
        serde_json::to_value(self).map_err(|e| {
            DomainError::new(
                ErrorCode::SerializationFailed,
                format!("Failed to serialize project {}: {}", self.id, e),
            )
        })
    }

    /// Reads a document from a JSON tree.
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        serde_json::from_value(value).map_err(|e| {
            DomainError::new(
                ErrorCode::SerializationFailed,
                format!("Stored project does not match the document shape: {}", e),
            )
        })
    }

    /// Parses a document from its serialized text.
    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw).map_err(|e| {
            DomainError::new(
                ErrorCode::SerializationFailed,
                format!("Stored project is not valid JSON: {}", e),
            )
        })
    }

    /// Serializes the document to text.
    pub fn to_json(&self) -> Result<String, DomainError> {
        serde_json::to_string(self).map_err(|e| {
            DomainError::new(
                ErrorCode::SerializationFailed,
                format!("Failed to serialize project {}: {}", self.id, e),
            )
        })
    }

    /// Deep-merges `partial` onto this document.
    ///
    /// The id is immutable, and the merged tree must still read as a
    /// document; either violation is an error and `self` is untouched.
    pub fn merged(&self, partial: &Value) -> Result<Self, DomainError> {
        if let Some(id) = partial.get("id") {
            if id.as_str() != Some(self.id.as_str()) {
                return Err(ValidationError::invalid_format("id", "project id is immutable").into());
            }
        }
        Self::from_value(deep_merge(&self.to_value()?, partial))
    }

    // ─── Read accessors over optional sub-records ───────────────────────────

    pub fn market_segments(&self) -> &[String] {
        self.marketability
            .as_ref()
            .map(|m| m.market_segments.as_slice())
            .unwrap_or(&[])
    }

    pub fn recommended_segments(&self) -> Option<&[TargetSegment; RECOMMENDED_SEGMENT_COUNT]> {
        self.marketability
            .as_ref()
            .and_then(|m| m.recommended_segments.as_ref())
    }

    pub fn niche_suggestion(&self) -> Option<&str> {
        self.marketability.as_ref().and_then(|m| m.niche())
    }

    pub fn positioning_statement(&self) -> Option<&str> {
        self.marketability.as_ref().and_then(|m| m.positioning())
    }

    pub fn packaging(&self) -> Option<&Packaging> {
        self.innovation.as_ref().map(|i| &i.packaging)
    }

    pub fn variants(&self) -> &[Variant] {
        self.innovation
            .as_ref()
            .map(|i| i.variants.as_slice())
            .unwrap_or(&[])
    }

    pub fn feedback(&self) -> FeedbackLog {
        self.innovation
            .as_ref()
            .map(|i| i.feedback.clone())
            .unwrap_or_default()
    }

    pub fn projection(&self) -> Option<&Projection> {
        self.financials.as_ref().and_then(|f| f.projection.as_ref())
    }

    /// Mutable innovation record, created on first access.
    pub fn innovation_mut(&mut self) -> &mut Innovation {
        self.innovation.get_or_insert_with(Innovation::default)
    }
}
