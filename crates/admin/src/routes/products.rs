//! Product management handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};

use alqotari_core::{Product, ProductId, ProductInput};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

use super::require_fields;

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(index).post(create))
        .route("/api/products/{id}", put(update).delete(destroy))
}

fn not_found() -> AppError {
    AppError::NotFound("product".to_string())
}

/// Every product, hidden ones included, in catalog order.
///
/// GET /api/products
async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>> {
    Ok(Json(ProductRepository::new(state.pool()).list().await?))
}

/// POST /api/products
async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>)> {
    require_fields(&input.missing_fields())?;
    let product = ProductRepository::new(state.pool()).create(input).await?;
    tracing::info!(admin_user_id = %admin.id, product_id = %product.id, "Product created by admin");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace every editable field of a product.
///
/// PUT /api/products/{id}
async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>> {
    require_fields(&input.missing_fields())?;
    let product = ProductRepository::new(state.pool())
        .update(id, input)
        .await?
        .ok_or_else(not_found)?;
    tracing::info!(admin_user_id = %admin.id, product_id = %id, "Product updated by admin");
    Ok(Json(product))
}

/// DELETE /api/products/{id}
async fn destroy(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    if !ProductRepository::new(state.pool()).delete(id).await? {
        return Err(not_found());
    }
    tracing::info!(admin_user_id = %admin.id, product_id = %id, "Product deleted by admin");
    Ok(StatusCode::NO_CONTENT)
}
