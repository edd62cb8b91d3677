//! Generation model.
//!
//! Generations are immutable: a product accumulates a history of them, and
//! none is ever updated in place.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shelftalk_core::{GenerationId, ProductId};

/// One complete content-generation run for a product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    /// Generation ID.
    pub id: GenerationId,
    /// Product this generation belongs to.
    pub product_id: ProductId,
    /// SEO title.
    pub seo_title: String,
    /// Marketplace long description.
    pub long_description: String,
    /// Comma-separated keyword list.
    pub tags: String,
    /// Instagram caption.
    pub social_instagram: String,
    /// TikTok caption.
    pub social_tiktok: String,
    /// Facebook caption.
    pub social_facebook: String,
    /// Pinterest caption.
    pub social_pinterest: String,
    /// When the generation was produced.
    pub created_at: DateTime<Utc>,
}

/// Fields for persisting a generation.
#[derive(Debug)]
pub struct NewGeneration {
    /// Product this generation belongs to.
    pub product_id: ProductId,
    /// SEO title.
    pub seo_title: String,
    /// Marketplace long description.
    pub long_description: String,
    /// Comma-separated keyword list.
    pub tags: String,
    /// Instagram caption.
    pub social_instagram: String,
    /// TikTok caption.
    pub social_tiktok: String,
    /// Facebook caption.
    pub social_facebook: String,
    /// Pinterest caption.
    pub social_pinterest: String,
}
