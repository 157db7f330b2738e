//! Innovation sub-record: packaging, product variants and the feedback loop.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    FeedbackId, FeedbackRating, IterationId, Timestamp, ValidationError, VariantId,
};

/// Days between feedback iterations before a new one is recommended.
pub const ITERATION_INTERVAL_DAYS: i64 = 60;

/// Segment names that hint a personalization variant would sell.
const PERSONALIZATION_SEGMENTS: &[&str] = &["remaja", "keluarga", "pasangan"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Innovation {
    pub packaging: Packaging,
    pub variants: Vec<Variant>,
    pub feedback: FeedbackLog,
}

// ════════════════════════════════════════════════════════════════════════════
// Packaging
// ════════════════════════════════════════════════════════════════════════════

/// Packaging design notes and the two logistics checks.
///
/// `isLogisticsReady` is written on the wire for readers of the stored
/// document, but it is always recomputed from the two checks and any stored
/// value is ignored on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PackagingRecord", into = "PackagingRecord")]
pub struct Packaging {
    pub notes: String,
    pub is_adaptive: bool,
    pub is_tested: bool,
}

impl Packaging {
    pub fn new(notes: impl Into<String>, is_adaptive: bool, is_tested: bool) -> Self {
        Self {
            notes: notes.into(),
            is_adaptive,
            is_tested,
        }
    }

    pub fn is_logistics_ready(&self) -> bool {
        self.is_adaptive && self.is_tested
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PackagingRecord {
    notes: String,
    is_adaptive: bool,
    is_tested: bool,
    is_logistics_ready: bool,
}

impl From<PackagingRecord> for Packaging {
    fn from(record: PackagingRecord) -> Self {
        Packaging::new(record.notes, record.is_adaptive, record.is_tested)
    }
}

impl From<Packaging> for PackagingRecord {
    fn from(packaging: Packaging) -> Self {
        let is_logistics_ready = packaging.is_logistics_ready();
        PackagingRecord {
            notes: packaging.notes,
            is_adaptive: packaging.is_adaptive,
            is_tested: packaging.is_tested,
            is_logistics_ready,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Variants
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantType {
    Flavor,
    Size,
    Personalization,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: VariantId,
    pub name: String,
    #[serde(rename = "type")]
    pub variant_type: VariantType,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Partial edit of a variant; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct VariantChanges {
    pub name: Option<String>,
    pub variant_type: Option<VariantType>,
    pub is_active: Option<bool>,
}

impl Variant {
    /// Creates a variant with a fresh id. The name must not be blank.
    pub fn new(
        name: impl Into<String>,
        variant_type: VariantType,
        is_active: bool,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: VariantId::new(),
            name: required_name(name.into())?,
            variant_type,
            is_active,
        })
    }

    /// Applies an edit, keeping the id.
    pub fn apply(&self, changes: VariantChanges) -> Result<Self, ValidationError> {
        let name = match changes.name {
            Some(name) => required_name(name)?,
            None => self.name.clone(),
        };
        Ok(Self {
            id: self.id.clone(),
            name,
            variant_type: changes.variant_type.unwrap_or(self.variant_type),
            is_active: changes.is_active.unwrap_or(self.is_active),
        })
    }
}

fn required_name(name: String) -> Result<String, ValidationError> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(ValidationError::empty_field("variant.name"));
    }
    Ok(name)
}

/// True when any selected segment names teens, families or couples.
pub fn suggests_personalization(selected_segments: &[String]) -> bool {
    selected_segments
        .iter()
        .any(|s| PERSONALIZATION_SEGMENTS.contains(&s.trim().to_lowercase().as_str()))
}

// ════════════════════════════════════════════════════════════════════════════
// Feedback loop
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackSource {
    Marketplace,
    #[serde(rename = "Social Media")]
    SocialMedia,
    #[serde(rename = "Internal Form")]
    InternalForm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub id: FeedbackId,
    pub source: FeedbackSource,
    pub comment: String,
    pub rating: FeedbackRating,
    pub date: Timestamp,
}

impl FeedbackEntry {
    pub fn new(
        source: FeedbackSource,
        comment: impl Into<String>,
        rating: u8,
        date: Timestamp,
    ) -> Result<Self, ValidationError> {
        let comment = comment.into().trim().to_string();
        if comment.is_empty() {
            return Err(ValidationError::empty_field("feedback.comment"));
        }
        Ok(Self {
            id: FeedbackId::new(),
            source,
            comment,
            rating: FeedbackRating::try_new(rating)?,
            date,
        })
    }
}

/// A closed round of feedback. Only constructible by closing the current
/// round, and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackIteration {
    id: IterationId,
    date: Timestamp,
    feedbacks: Vec<FeedbackEntry>,
}

impl FeedbackIteration {
    pub fn id(&self) -> &IterationId {
        &self.id
    }

    pub fn date(&self) -> Timestamp {
        self.date
    }

    pub fn feedbacks(&self) -> &[FeedbackEntry] {
        &self.feedbacks
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedbackLog {
    /// Newest first.
    pub current_feedbacks: Vec<FeedbackEntry>,
    /// Newest first.
    pub iterations: Vec<FeedbackIteration>,
}

impl FeedbackLog {
    /// Returns a log with `entry` at the head of the current round.
    ///
    /// Rejects an entry whose id is already present in the current round.
    pub fn with_feedback(&self, entry: FeedbackEntry) -> Result<Self, ValidationError> {
        if self.current_feedbacks.iter().any(|f| f.id == entry.id) {
            return Err(ValidationError::invalid_format(
                "feedback.id",
                format!("duplicate feedback id {}", entry.id),
            ));
        }
        let mut current = Vec::with_capacity(self.current_feedbacks.len() + 1);
        current.push(entry);
        current.extend(self.current_feedbacks.iter().cloned());
        Ok(Self {
            current_feedbacks: current,
            iterations: self.iterations.clone(),
        })
    }

    /// Closes the current round into a new iteration and starts an empty one.
    pub fn start_new_iteration(&self, now: Timestamp) -> Self {
        let mut id = IterationId::new();
        while self.iterations.iter().any(|i| i.id == id) {
            id = IterationId::new();
        }
        let closed = FeedbackIteration {
            id,
            date: now,
            feedbacks: self.current_feedbacks.clone(),
        };
        let mut iterations = Vec::with_capacity(self.iterations.len() + 1);
        iterations.push(closed);
        iterations.extend(self.iterations.iter().cloned());
        Self {
            current_feedbacks: Vec::new(),
            iterations,
        }
    }

    /// Date of the most recent closed iteration.
    pub fn last_iteration_date(&self) -> Option<Timestamp> {
        self.iterations.iter().map(|i| i.date).max()
    }

    /// When the next iteration should start: the latest iteration (or `now`
    /// if none was closed yet) plus [`ITERATION_INTERVAL_DAYS`].
    pub fn recommended_next_iteration(&self, now: Timestamp) -> Timestamp {
        self.last_iteration_date()
            .unwrap_or(now)
            .add_days(ITERATION_INTERVAL_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn logistics_ready_requires_both_checks() {
        assert!(!Packaging::new("", true, false).is_logistics_ready());
        assert!(!Packaging::new("", false, true).is_logistics_ready());
        assert!(Packaging::new("", true, true).is_logistics_ready());
    }

    #[test]
    fn stored_logistics_flag_is_recomputed() {
        let p: Packaging = serde_json::from_value(json!({
            "notes": "bubble wrap",
            "isAdaptive": true,
            "isTested": false,
            "isLogisticsReady": true
        }))
        .unwrap();
        assert!(!p.is_logistics_ready());
        let out = serde_json::to_value(&p).unwrap();
        assert_eq!(out["isLogisticsReady"], json!(false));
    }

    #[test]
    fn variant_requires_name() {
        assert!(Variant::new("  ", VariantType::Size, true).is_err());
    }

    #[test]
    fn variant_apply_keeps_id_and_unchanged_fields() {
        let v = Variant::new("Original", VariantType::Flavor, true).unwrap();
        let edited = v
            .apply(VariantChanges {
                is_active: Some(false),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(edited.id, v.id);
        assert_eq!(edited.name, "Original");
        assert!(!edited.is_active);
    }

    #[test]
    fn personalization_hint_matches_segment_names() {
        assert!(suggests_personalization(&["Keluarga".to_string()]));
        assert!(!suggests_personalization(&["Keluarga muda urban".to_string()]));
        assert!(!suggests_personalization(&[]));
    }

    #[test]
    fn feedback_source_labels() {
        assert_eq!(
            serde_json::to_value(FeedbackSource::SocialMedia).unwrap(),
            json!("Social Media")
        );
    }

    #[test]
    fn feedback_entry_validates_rating() {
        assert!(FeedbackEntry::new(FeedbackSource::Marketplace, "Great", 6, Timestamp::now()).is_err());
        assert!(FeedbackEntry::new(FeedbackSource::Marketplace, " ", 4, Timestamp::now()).is_err());
    }

    #[test]
    fn feedback_is_prepended() {
        let first = FeedbackEntry::new(FeedbackSource::Marketplace, "first", 3, Timestamp::now()).unwrap();
        let second = FeedbackEntry::new(FeedbackSource::InternalForm, "second", 5, Timestamp::now()).unwrap();
        let log = FeedbackLog::default()
            .with_feedback(first.clone())
            .unwrap()
            .with_feedback(second.clone())
            .unwrap();
        assert_eq!(log.current_feedbacks, vec![second, first]);
    }

    #[test]
    fn duplicate_feedback_id_is_rejected() {
        let entry = FeedbackEntry::new(FeedbackSource::Marketplace, "once", 3, Timestamp::now()).unwrap();
        let log = FeedbackLog::default().with_feedback(entry.clone()).unwrap();
        assert!(log.with_feedback(entry).is_err());
    }

    #[test]
    fn new_iteration_snapshots_and_clears() {
        let entry = FeedbackEntry::new(FeedbackSource::Marketplace, "ok", 4, Timestamp::now()).unwrap();
        let log = FeedbackLog::default().with_feedback(entry.clone()).unwrap();
        let now = Timestamp::now();
        let next = log.start_new_iteration(now);

        assert!(next.current_feedbacks.is_empty());
        assert_eq!(next.iterations.len(), 1);
        assert_eq!(next.iterations[0].feedbacks(), &[entry]);
        assert_eq!(next.iterations[0].date(), now);
        assert_eq!(next.recommended_next_iteration(Timestamp::now()), now.add_days(60));
    }

    #[test]
    fn closed_iterations_survive_later_feedback() {
        let entry = FeedbackEntry::new(FeedbackSource::Marketplace, "round one", 2, Timestamp::now()).unwrap();
        let closed = FeedbackLog::default()
            .with_feedback(entry.clone())
            .unwrap()
            .start_new_iteration(Timestamp::now());
        let later = FeedbackEntry::new(FeedbackSource::Marketplace, "round two", 5, Timestamp::now()).unwrap();
        let log = closed.with_feedback(later).unwrap();
        assert_eq!(log.iterations[0].feedbacks(), &[entry]);
    }
}
