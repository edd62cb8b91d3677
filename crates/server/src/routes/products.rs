//! Product CRUD routes.
//!
//! Create and update accept `multipart/form-data` so the image file can ride
//! along with the text fields. Uploaded images are stored under the upload
//! directory with UUID filenames and served back at `/uploads/products/`.

use std::path::Path;

use axum::{
    Json, Router,
    extract::{Multipart, Path as UrlPath, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use shelftalk_core::ProductId;

use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAuth;
use crate::models::product::{NewProduct, Product, ProductUpdate};
use crate::state::AppState;

/// Maximum accepted image size (5 MiB), matching the client-side limit.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Accepted image MIME types and their stored extensions.
const ALLOWED_IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_one).patch(update).delete(remove))
}

/// Text fields and stored image URL extracted from a multipart form.
#[derive(Debug, Default)]
struct ProductForm {
    name: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
}

/// Read a product multipart form, persisting the image field if present.
async fn read_product_form(state: &AppState, mut multipart: Multipart) -> Result<ProductForm> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("name") => form.name = Some(field.text().await?),
            Some("description") => form.description = Some(field.text().await?),
            Some("image") => {
                let content_type = field
                    .content_type()
                    .ok_or_else(|| {
                        AppError::BadRequest("image field must have a content type".to_string())
                    })?
                    .to_string();

                let extension = ALLOWED_IMAGE_TYPES
                    .iter()
                    .find(|(mime, _)| *mime == content_type)
                    .map(|(_, ext)| *ext)
                    .ok_or_else(|| {
                        AppError::BadRequest(format!(
                            "unsupported image type: {content_type} (allowed: jpeg, png, gif, webp)"
                        ))
                    })?;

                let bytes = field.bytes().await?;
                if bytes.len() > MAX_IMAGE_BYTES {
                    return Err(AppError::BadRequest(
                        "image exceeds the 5 MiB limit".to_string(),
                    ));
                }

                form.image_url = Some(store_image(&state.config().upload_dir, extension, &bytes).await?);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Write image bytes under the upload dir with a fresh UUID filename and
/// return the public URL.
async fn store_image(upload_dir: &Path, extension: &str, bytes: &[u8]) -> Result<String> {
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::Internal(format!("failed to create upload dir: {e}")))?;

    let filename = format!("{}.{extension}", Uuid::new_v4());
    let path = upload_dir.join(&filename);

    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store image: {e}")))?;

    tracing::debug!(file = %filename, size = bytes.len(), "stored product image");

    Ok(format!("/uploads/products/{filename}"))
}

/// Load a product, treating another user's product as missing.
async fn owned_product(state: &AppState, owner: shelftalk_core::UserId, id: ProductId) -> Result<Product> {
    let product = crate::db::products::ProductRepository::new(state.pool())
        .get(id)
        .await?
        .filter(|p| p.owner_id == owner)
        .ok_or_else(|| AppError::NotFound("product not found".to_string()))?;

    Ok(product)
}

/// Create a product from a multipart form.
async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Product>)> {
    let form = read_product_form(&state, multipart).await?;

    let name = form
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::BadRequest("name is required".to_string()))?
        .to_string();

    let product = crate::db::products::ProductRepository::new(state.pool())
        .create(&NewProduct {
            owner_id: user.id,
            name,
            description: form.description,
            image_url: form.image_url,
        })
        .await?;

    tracing::info!(product_id = %product.id, "product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// List the caller's products, newest first.
async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Product>>> {
    let products = crate::db::products::ProductRepository::new(state.pool())
        .list_by_owner(user.id)
        .await?;

    Ok(Json(products))
}

/// Get one product.
async fn get_one(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    UrlPath(id): UrlPath<ProductId>,
) -> Result<Json<Product>> {
    let product = owned_product(&state, user.id, id).await?;
    Ok(Json(product))
}

/// Partially update a product (may replace the image).
///
/// Fields absent from the multipart form are left unchanged. Multipart has
/// no way to express an explicit null, so `description` and `image_url`
/// cannot be cleared back to NULL through this route; they can only be
/// replaced.
async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    UrlPath(id): UrlPath<ProductId>,
    multipart: Multipart,
) -> Result<Json<Product>> {
    owned_product(&state, user.id, id).await?;

    let form = read_product_form(&state, multipart).await?;

    if let Some(name) = &form.name
        && name.trim().is_empty()
    {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }

    let product = crate::db::products::ProductRepository::new(state.pool())
        .update(
            id,
            &ProductUpdate {
                name: form.name.map(|n| n.trim().to_string()),
                description: form.description,
                image_url: form.image_url,
            },
        )
        .await?
        .ok_or_else(|| AppError::NotFound("product not found".to_string()))?;

    Ok(Json(product))
}

/// Delete a product. Its generation history cascades away with it.
async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    UrlPath(id): UrlPath<ProductId>,
) -> Result<StatusCode> {
    owned_product(&state, user.id, id).await?;

    let deleted = crate::db::products::ProductRepository::new(state.pool())
        .delete(id)
        .await?;

    if !deleted {
        return Err(AppError::NotFound("product not found".to_string()));
    }

    tracing::info!(product_id = %id, "product deleted");

    Ok(StatusCode::NO_CONTENT)
}
