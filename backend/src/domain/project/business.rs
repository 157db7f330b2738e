//! Business profile captured at project creation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Minimum length of the products description.
pub const MIN_PRODUCTS_LEN: usize = 10;

/// Kind of business being planned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusinessType {
    #[serde(rename = "F&B")]
    FoodAndBeverage,
    Fashion,
    Services,
    Tech,
    /// Also absorbs unknown values from older or foreign records.
    #[default]
    #[serde(other)]
    Other,
}

impl BusinessType {
    /// All selectable business types, in form order.
    pub fn all() -> [BusinessType; 5] {
        [
            BusinessType::FoodAndBeverage,
            BusinessType::Fashion,
            BusinessType::Services,
            BusinessType::Tech,
            BusinessType::Other,
        ]
    }

    /// Returns the wire label (`"F&B"`, `"Fashion"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::FoodAndBeverage => "F&B",
            BusinessType::Fashion => "Fashion",
            BusinessType::Services => "Services",
            BusinessType::Tech => "Tech",
            BusinessType::Other => "Other",
        }
    }

    /// Parses a wire label strictly.
    pub fn parse(label: &str) -> Result<Self, ValidationError> {
        Self::all()
            .into_iter()
            .find(|t| t.as_str() == label)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "business.type",
                    format!("'{}' is not one of F&B, Fashion, Services, Tech, Other", label),
                )
            })
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Required business sub-record of every project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Business {
    pub name: String,
    #[serde(rename = "type")]
    pub business_type: BusinessType,
    pub products: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Business {
    /// Builds a validated business record.
    ///
    /// The name must not be blank and the products description must be at
    /// least [`MIN_PRODUCTS_LEN`] characters. A blank description is dropped.
    pub fn new(
        name: impl Into<String>,
        business_type: BusinessType,
        products: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("business.name"));
        }

        let products = products.into().trim().to_string();
        let len = products.chars().count();
        if len < MIN_PRODUCTS_LEN {
            return Err(ValidationError::too_short("business.products", MIN_PRODUCTS_LEN, len));
        }

        let description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(Self {
            name,
            business_type,
            products,
            description,
        })
    }
}
