//! Content-generation orchestrator.
//!
//! Runs the full pipeline fan-out for a product and persists the result as
//! an immutable generation. Fail-fast by policy: no retries, no partial
//! persistence; if any pipeline fails the whole run fails and nothing is
//! written.

use std::path::{Path, PathBuf};

use sqlx::PgPool;

use shelftalk_core::{GenerationId, Marketplace, ProductId, SocialChannel, Tone, UserId};

use crate::ai::pipelines::{long_description, social_post, tags, title};
use crate::ai::vision::{analyze_image, format_analysis_for_prompt};
use crate::ai::{
    CompletionError, ProductInput, SocialPostInput, TagsInput, TextCompletion, TitleInput,
    VisionCompletion,
};
use crate::db::RepositoryError;
use crate::db::generations::GenerationRepository;
use crate::db::products::ProductRepository;
use crate::models::generation::{Generation, NewGeneration};
use crate::models::product::Product;

/// Errors from generation operations.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The product does not exist, or belongs to another user. The two
    /// cases are indistinguishable on purpose.
    #[error("product not found")]
    ProductNotFound,

    /// The generation does not exist, or belongs to another user's product.
    #[error("generation not found")]
    GenerationNotFound,

    /// Database operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// A pipeline's provider call failed.
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

/// All texts produced by one pipeline fan-out.
#[derive(Debug, Clone)]
pub struct GeneratedContent {
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

/// Run all seven pipelines concurrently against the given product facts.
///
/// All-or-nothing: the first pipeline error aborts the whole fan-out.
///
/// # Errors
///
/// Returns [`CompletionError`] if any pipeline's provider call fails.
pub async fn run_pipelines<C: TextCompletion>(
    client: &C,
    product: &ProductInput,
) -> Result<GeneratedContent, CompletionError> {
    let social_input = |channel| SocialPostInput {
        product: product.clone(),
        channel,
        tone: Tone::default(),
    };

    let title_input = TitleInput {
        product: product.clone(),
        max_length: title::DEFAULT_MAX_LENGTH,
        marketplace: Marketplace::default(),
    };
    let tags_input = TagsInput {
        product: product.clone(),
        max_tags: tags::DEFAULT_MAX_TAGS,
    };
    let instagram_input = social_input(SocialChannel::Instagram);
    let tiktok_input = social_input(SocialChannel::Tiktok);
    let facebook_input = social_input(SocialChannel::Facebook);
    let pinterest_input = social_input(SocialChannel::Pinterest);

    let (
        seo_title,
        long_description,
        tags,
        social_instagram,
        social_tiktok,
        social_facebook,
        social_pinterest,
    ) = tokio::try_join!(
        title::run(client, &title_input),
        long_description::run(client, product),
        tags::run(client, &tags_input),
        social_post::run(client, &instagram_input),
        social_post::run(client, &tiktok_input),
        social_post::run(client, &facebook_input),
        social_post::run(client, &pinterest_input),
    )?;

    Ok(GeneratedContent {
        seo_title,
        long_description,
        tags,
        social_instagram,
        social_tiktok,
        social_facebook,
        social_pinterest,
    })
}

/// Fold a vision analysis into the product description passed to pipelines.
///
/// Pure; exposed for tests.
#[must_use]
pub fn enrich_description(description: Option<&str>, analysis_summary: &str) -> Option<String> {
    if analysis_summary.is_empty() {
        return description.map(ToOwned::to_owned);
    }

    let enriched = match description {
        Some(base) if !base.trim().is_empty() => {
            format!("{base}\n\nAnálise visual da imagem:\n{analysis_summary}")
        }
        _ => format!("Análise visual da imagem:\n{analysis_summary}"),
    };

    Some(enriched)
}

/// Resolve a stored image URL ("/uploads/products/<file>") to a path under
/// the upload directory. Foreign URLs resolve to `None`.
fn resolve_image_path(upload_dir: &Path, image_url: &str) -> Option<PathBuf> {
    let filename = image_url.rsplit('/').next()?;
    if filename.is_empty() || filename.contains("..") {
        return None;
    }
    Some(upload_dir.join(filename))
}

/// Generation orchestrator.
pub struct GenerationService<'a, C> {
    pool: &'a PgPool,
    client: &'a C,
    upload_dir: &'a Path,
}

impl<'a, C> GenerationService<'a, C>
where
    C: TextCompletion + VisionCompletion,
{
    /// Create a new generation service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, client: &'a C, upload_dir: &'a Path) -> Self {
        Self {
            pool,
            client,
            upload_dir,
        }
    }

    /// Generate all content types for a product and persist them.
    ///
    /// If the product has an image, it is analyzed first and the summary is
    /// folded into the description every pipeline sees. Vision failure is
    /// invisible; the run proceeds on the product facts alone.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::ProductNotFound` if the product does not
    /// exist or is owned by someone else.
    /// Returns `GenerationError::Completion` if any pipeline fails; nothing
    /// is persisted in that case.
    pub async fn generate_all(
        &self,
        owner_id: UserId,
        product_id: ProductId,
    ) -> Result<Generation, GenerationError> {
        tracing::info!(%product_id, "generating content for product");

        let product = self.owned_product(owner_id, product_id).await?;

        let input = self.product_input(&product).await;

        let content = run_pipelines(self.client, &input).await?;

        tracing::debug!(%product_id, "pipelines complete, persisting generation");

        let generation = GenerationRepository::new(self.pool)
            .insert(&NewGeneration {
                product_id,
                seo_title: content.seo_title,
                long_description: content.long_description,
                tags: content.tags,
                social_instagram: content.social_instagram,
                social_tiktok: content.social_tiktok,
                social_facebook: content.social_facebook,
                social_pinterest: content.social_pinterest,
            })
            .await?;

        tracing::info!(generation_id = %generation.id, "generation saved");

        Ok(generation)
    }

    /// List a product's generations, newest first.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::ProductNotFound` if the product does not
    /// exist or is owned by someone else.
    pub async fn list_for_product(
        &self,
        owner_id: UserId,
        product_id: ProductId,
    ) -> Result<Vec<Generation>, GenerationError> {
        self.owned_product(owner_id, product_id).await?;

        let generations = GenerationRepository::new(self.pool)
            .list_by_product(product_id)
            .await?;

        Ok(generations)
    }

    /// Get a single generation, checking ownership through its product.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::GenerationNotFound` if the generation does
    /// not exist or belongs to another user's product.
    pub async fn get(
        &self,
        owner_id: UserId,
        id: GenerationId,
    ) -> Result<Generation, GenerationError> {
        let (generation, generation_owner) = GenerationRepository::new(self.pool)
            .get_with_owner(id)
            .await?
            .ok_or(GenerationError::GenerationNotFound)?;

        if generation_owner != owner_id {
            return Err(GenerationError::GenerationNotFound);
        }

        Ok(generation)
    }

    /// Load a product, treating foreign ownership as absence.
    async fn owned_product(
        &self,
        owner_id: UserId,
        product_id: ProductId,
    ) -> Result<Product, GenerationError> {
        let product = ProductRepository::new(self.pool)
            .get(product_id)
            .await?
            .ok_or(GenerationError::ProductNotFound)?;

        if product.owner_id != owner_id {
            return Err(GenerationError::ProductNotFound);
        }

        Ok(product)
    }

    /// Build the pipeline input, enriching the description from the product
    /// image when one exists.
    async fn product_input(&self, product: &Product) -> ProductInput {
        let description = match product
            .image_url
            .as_deref()
            .and_then(|url| resolve_image_path(self.upload_dir, url))
        {
            Some(image_path) => {
                let analysis = analyze_image(self.client, &image_path).await;
                let summary = format_analysis_for_prompt(&analysis);
                enrich_description(product.description.as_deref(), &summary)
            }
            None => {
                tracing::debug!(product_id = %product.id, "no image, text-only generation");
                product.description.clone()
            }
        };

        ProductInput {
            name: product.name.clone(),
            description,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_enrich_description_appends_summary() {
        let enriched = enrich_description(Some("Caneca de aço."), "Cores: prata").unwrap();
        assert_eq!(
            enriched,
            "Caneca de aço.\n\nAnálise visual da imagem:\nCores: prata"
        );
    }

    #[test]
    fn test_enrich_description_without_base_text() {
        let enriched = enrich_description(None, "Cores: prata").unwrap();
        assert_eq!(enriched, "Análise visual da imagem:\nCores: prata");
    }

    #[test]
    fn test_enrich_description_empty_summary_is_identity() {
        assert_eq!(
            enrich_description(Some("base"), ""),
            Some("base".to_string())
        );
        assert_eq!(enrich_description(None, ""), None);
    }

    #[test]
    fn test_resolve_image_path_takes_last_segment() {
        let dir = Path::new("/srv/uploads");
        assert_eq!(
            resolve_image_path(dir, "/uploads/products/abc.png"),
            Some(PathBuf::from("/srv/uploads/abc.png"))
        );
    }

    #[test]
    fn test_resolve_image_path_rejects_traversal_and_empty() {
        let dir = Path::new("/srv/uploads");
        assert_eq!(resolve_image_path(dir, "/uploads/products/"), None);
        assert_eq!(resolve_image_path(dir, "/uploads/..%2f/../etc/passwd/.."), None);
    }
}
