//! Preview routes: generate copy without persisting anything.
//!
//! The frontend uses these for live previews while the user edits a product
//! that may not be saved yet.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};

use shelftalk_core::{Marketplace, SocialChannel, Tone};

use crate::ai::pipelines::{long_description, social_post, tags, title};
use crate::ai::{ProductInput, SocialPostInput, TagsInput, TitleInput};
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAuth;
use crate::state::AppState;

/// Smallest usable title bound; anything shorter cannot fit a product name.
const MIN_TITLE_LENGTH: usize = 20;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/preview/title", post(preview_title))
        .route("/preview/description", post(preview_description))
        .route("/preview/tags", post(preview_tags))
        .route("/preview/social", post(preview_social))
}

#[derive(Debug, Serialize)]
struct PreviewResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TitlePreviewRequest {
    name: String,
    description: Option<String>,
    max_length: Option<usize>,
    marketplace: Option<Marketplace>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescriptionPreviewRequest {
    name: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TagsPreviewRequest {
    name: String,
    description: Option<String>,
    max_tags: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SocialPreviewRequest {
    name: String,
    description: Option<String>,
    channel: SocialChannel,
    tone: Option<Tone>,
}

/// Reject requests whose parameters are out of range before any provider
/// call is made.
fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }
    Ok(())
}

fn validate_max_length(max_length: usize) -> Result<()> {
    if max_length < MIN_TITLE_LENGTH {
        return Err(AppError::BadRequest(format!(
            "maxLength must be at least {MIN_TITLE_LENGTH}"
        )));
    }
    Ok(())
}

fn validate_max_tags(max_tags: usize) -> Result<()> {
    if max_tags == 0 {
        return Err(AppError::BadRequest(
            "maxTags must be at least 1".to_string(),
        ));
    }
    Ok(())
}

async fn preview_title(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<TitlePreviewRequest>,
) -> Result<Json<PreviewResponse>> {
    tracing::debug!(user_id = %user.id, "title preview requested");

    validate_name(&body.name)?;
    let max_length = body.max_length.unwrap_or(title::DEFAULT_MAX_LENGTH);
    validate_max_length(max_length)?;

    let result = title::run(
        state.openai(),
        &TitleInput {
            product: ProductInput {
                name: body.name,
                description: body.description,
            },
            max_length,
            marketplace: body.marketplace.unwrap_or_default(),
        },
    )
    .await?;

    Ok(Json(PreviewResponse { result }))
}

async fn preview_description(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<DescriptionPreviewRequest>,
) -> Result<Json<PreviewResponse>> {
    tracing::debug!(user_id = %user.id, "description preview requested");

    validate_name(&body.name)?;

    let result = long_description::run(
        state.openai(),
        &ProductInput {
            name: body.name,
            description: body.description,
        },
    )
    .await?;

    Ok(Json(PreviewResponse { result }))
}

async fn preview_tags(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<TagsPreviewRequest>,
) -> Result<Json<PreviewResponse>> {
    tracing::debug!(user_id = %user.id, "tags preview requested");

    validate_name(&body.name)?;
    let max_tags = body.max_tags.unwrap_or(tags::DEFAULT_MAX_TAGS);
    validate_max_tags(max_tags)?;

    let result = tags::run(
        state.openai(),
        &TagsInput {
            product: ProductInput {
                name: body.name,
                description: body.description,
            },
            max_tags,
        },
    )
    .await?;

    Ok(Json(PreviewResponse { result }))
}

async fn preview_social(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<SocialPreviewRequest>,
) -> Result<Json<PreviewResponse>> {
    tracing::debug!(user_id = %user.id, channel = %body.channel, "social preview requested");

    validate_name(&body.name)?;

    let result = social_post::run(
        state.openai(),
        &SocialPostInput {
            product: ProductInput {
                name: body.name,
                description: body.description,
            },
            channel: body.channel,
            tone: body.tone.unwrap_or_default(),
        },
    )
    .await?;

    Ok(Json(PreviewResponse { result }))
}
