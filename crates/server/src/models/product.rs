//! Product model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shelftalk_core::{ProductId, UserId};

/// A product owned by a user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Owning user.
    pub owner_id: UserId,
    /// Product name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Public URL of the uploaded image, if any.
    pub image_url: Option<String>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a product.
#[derive(Debug)]
pub struct NewProduct {
    /// Owning user.
    pub owner_id: UserId,
    /// Product name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Public URL of the uploaded image, if any.
    pub image_url: Option<String>,
}

/// Partial update for a product. `None` fields are left untouched.
#[derive(Debug, Default)]
pub struct ProductUpdate {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New image URL.
    pub image_url: Option<String>,
}
