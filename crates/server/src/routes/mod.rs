//! HTTP route handlers.

pub mod ai;
pub mod auth;
pub mod generations;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Assemble all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth::routes())
        .nest("/api/products", products::routes())
        .nest("/api/generations", generations::routes())
        .nest("/api/ai", ai::routes())
}
