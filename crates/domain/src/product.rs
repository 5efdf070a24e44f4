//! Product catalog entry.

use chrono::{DateTime, Utc};
use common::ProductId;
use serde::{Deserialize, Serialize};

/// A catalog product. Cart responses expand product references against
/// this record, so cart contents always reflect current name and price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Category label ("type" in the store documents).
    #[serde(rename = "type")]
    pub kind: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a new product record.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        kind: impl Into<String>,
        price: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            price,
            image: None,
            subcategory: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}
