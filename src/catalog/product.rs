//! Product records as stored and served.

use serde::{Deserialize, Serialize};

/// A persisted catalog entry, serialized with the camelCase field names the
/// public page and admin dashboard consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub description: String,
    pub detailed_description: String,
    pub code: String,
    pub image: String,
    pub specs: Vec<String>,
    pub features: Vec<String>,
    pub price: String,
    pub download_url: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Validated product fields ready to be written.
///
/// Only [`validate_product`](super::validate_product) produces drafts from
/// untrusted input, so every draft already satisfies the field limits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    /// `Some` updates that row, `None` inserts a new one.
    pub id: Option<i64>,
    pub name: String,
    pub category: String,
    pub description: String,
    pub detailed_description: String,
    pub code: String,
    pub image: String,
    pub specs: Vec<String>,
    pub features: Vec<String>,
    pub price: String,
    pub download_url: String,
}

impl ProductDraft {
    /// Target an existing row.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Force an insert regardless of what the payload carried.
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }
}
