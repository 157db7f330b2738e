//! Strongly-typed identifier value objects.
//!
//! Identifiers are opaque strings rather than UUIDs: the remote collection
//! assigns its own ids (e.g. `"12"`) and locally created records carry a
//! prefixed UUID (e.g. `proj_3f0c...`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(format!(concat!($prefix, "{}"), Uuid::new_v4().simple()))
            }

            /// Wraps an existing identifier, rejecting blank values.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(ValidationError::empty_field(stringify!($name)));
                }
                Ok(Self(value))
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

string_id!(
    /// Unique identifier for a planning project. Immutable once assigned.
    ProjectId,
    "proj_"
);

string_id!(
    /// Identifier of a product variant, unique within its project.
    VariantId,
    "var_"
);

string_id!(
    /// Identifier of a feedback entry, unique within its list.
    FeedbackId,
    "fb_"
);

string_id!(
    /// Identifier of a closed feedback iteration.
    IterationId,
    "iter_"
);
