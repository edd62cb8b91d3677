//! Generation repository.
//!
//! Insert and read only; generations are never updated.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use shelftalk_core::{GenerationId, ProductId, UserId};

use super::RepositoryError;
use crate::models::generation::{Generation, NewGeneration};

/// Raw row shape for the `generations` table.
#[derive(Debug, sqlx::FromRow)]
struct GenerationRow {
    id: GenerationId,
    product_id: ProductId,
    seo_title: String,
    long_description: String,
    tags: String,
    social_instagram: String,
    social_tiktok: String,
    social_facebook: String,
    social_pinterest: String,
    created_at: DateTime<Utc>,
}

impl From<GenerationRow> for Generation {
    fn from(row: GenerationRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            seo_title: row.seo_title,
            long_description: row.long_description,
            tags: row.tags,
            social_instagram: row.social_instagram,
            social_tiktok: row.social_tiktok,
            social_facebook: row.social_facebook,
            social_pinterest: row.social_pinterest,
            created_at: row.created_at,
        }
    }
}

const GENERATION_COLUMNS: &str = "id, product_id, seo_title, long_description, tags, \
     social_instagram, social_tiktok, social_facebook, social_pinterest, created_at";

/// Repository for generation database operations.
pub struct GenerationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> GenerationRepository<'a> {
    /// Create a new generation repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a completed generation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, new: &NewGeneration) -> Result<Generation, RepositoryError> {
        let row = sqlx::query_as::<_, GenerationRow>(&format!(
            r"
            INSERT INTO generations
                (product_id, seo_title, long_description, tags,
                 social_instagram, social_tiktok, social_facebook, social_pinterest)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {GENERATION_COLUMNS}
            ",
        ))
        .bind(new.product_id)
        .bind(&new.seo_title)
        .bind(&new.long_description)
        .bind(&new.tags)
        .bind(&new.social_instagram)
        .bind(&new.social_tiktok)
        .bind(&new.social_facebook)
        .bind(&new.social_pinterest)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List all generations for a product, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Generation>, RepositoryError> {
        let rows = sqlx::query_as::<_, GenerationRow>(&format!(
            r"
            SELECT {GENERATION_COLUMNS}
            FROM generations
            WHERE product_id = $1
            ORDER BY created_at DESC
            ",
        ))
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a generation along with the owner of its product.
    ///
    /// The owner comes back with the row so ownership checks don't need a
    /// second query.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_owner(
        &self,
        id: GenerationId,
    ) -> Result<Option<(Generation, UserId)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct GenerationWithOwnerRow {
            #[sqlx(flatten)]
            generation: GenerationRow,
            owner_id: UserId,
        }

        let row = sqlx::query_as::<_, GenerationWithOwnerRow>(
            r"
            SELECT g.id, g.product_id, g.seo_title, g.long_description, g.tags,
                   g.social_instagram, g.social_tiktok, g.social_facebook,
                   g.social_pinterest, g.created_at, p.owner_id
            FROM generations g
            JOIN products p ON p.id = g.product_id
            WHERE g.id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| (r.generation.into(), r.owner_id)))
    }
}
