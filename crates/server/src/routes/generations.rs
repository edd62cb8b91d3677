//! Generation routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;

use shelftalk_core::{GenerationId, ProductId};

use crate::error::Result;
use crate::middleware::auth::RequireAuth;
use crate::models::generation::Generation;
use crate::services::generation::GenerationService;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/generate-all", post(generate_all))
        .route("/product/{id}", get(list_by_product))
        .route("/{id}", get(get_one))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateAllRequest {
    product_id: ProductId,
}

fn service<'a>(state: &'a AppState) -> GenerationService<'a, crate::openai::OpenAiClient> {
    GenerationService::new(state.pool(), state.openai(), &state.config().upload_dir)
}

/// Run the full pipeline fan-out for a product and persist the result.
async fn generate_all(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<GenerateAllRequest>,
) -> Result<(StatusCode, Json<Generation>)> {
    let generation = service(&state)
        .generate_all(user.id, body.product_id)
        .await?;

    Ok((StatusCode::CREATED, Json(generation)))
}

/// A product's generation history, newest first.
async fn list_by_product(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ProductId>,
) -> Result<Json<Vec<Generation>>> {
    let generations = service(&state).list_for_product(user.id, id).await?;

    Ok(Json(generations))
}

/// One generation, ownership enforced through its product.
async fn get_one(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<GenerationId>,
) -> Result<Json<Generation>> {
    let generation = service(&state).get(user.id, id).await?;

    Ok(Json(generation))
}
