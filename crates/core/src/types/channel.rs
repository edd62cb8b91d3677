//! Enums describing the content-generation surface.
//!
//! These are shared between the HTTP layer (request DTOs), the prompt
//! builders, and the persistence layer, so they live in core.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Social network a post variant is written for.
///
/// Each generation produces one post per channel, and each channel has its
/// own column in the generations table, so the set is closed by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialChannel {
    /// Instagram: aspirational copy with a handful of hashtags.
    Instagram,
    /// TikTok: short, energetic, trend-aware copy.
    Tiktok,
    /// Facebook: longer, storytelling copy.
    Facebook,
    /// Pinterest: discovery-oriented, descriptive copy.
    Pinterest,
}

impl SocialChannel {
    /// Every supported channel, in persistence-column order.
    pub const ALL: [Self; 4] = [
        Self::Instagram,
        Self::Tiktok,
        Self::Facebook,
        Self::Pinterest,
    ];

    /// Lowercase name, matching the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::Tiktok => "tiktok",
            Self::Facebook => "facebook",
            Self::Pinterest => "pinterest",
        }
    }
}

impl fmt::Display for SocialChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Voice requested for social posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Relaxed, conversational.
    Casual,
    /// Sophisticated, exclusive.
    Premium,
    /// Young, slang-friendly.
    Jovem,
    /// No strong voice; lets the copy speak for itself.
    #[default]
    Neutro,
}

impl Tone {
    /// Lowercase name, matching the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Casual => "casual",
            Self::Premium => "premium",
            Self::Jovem => "jovem",
            Self::Neutro => "neutro",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marketplace an SEO title targets.
///
/// Only steers the prompt (naming the platform the title is written for);
/// it is never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marketplace {
    /// Mercado Livre listing style.
    MercadoLivre,
    /// Amazon listing style.
    Amazon,
    /// Shopee listing style.
    Shopee,
    /// No marketplace-specific formatting.
    #[default]
    Generic,
}

impl Marketplace {
    /// Human-readable name used in prompts.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::MercadoLivre => "Mercado Livre",
            Self::Amazon => "Amazon",
            Self::Shopee => "Shopee",
            Self::Generic => "loja própria",
        }
    }
}
