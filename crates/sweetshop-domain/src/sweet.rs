//! Catalog domain types.

use serde::{Deserialize, Serialize};

use crate::id::SweetId;

/// An inventory item.
///
/// `price >= 0` and `quantity >= 0` hold for every stored sweet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sweet {
    #[serde(rename = "_id")]
    pub id: SweetId,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i32,
}

/// Catalog search criteria. Every present field must match (logical AND);
/// absent fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweetFilter {
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    /// Case-insensitive substring of the category.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
}

impl SweetFilter {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    pub fn matches(&self, sweet: &Sweet) -> bool {
        if let Some(ref name) = self.name {
            if !contains_ignore_case(&sweet.name, name) {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if !contains_ignore_case(&sweet.category, category) {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if sweet.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if sweet.price > max {
                return false;
            }
        }
        true
    }
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
