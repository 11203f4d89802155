//! Banner management handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};

use alqotari_core::{Banner, BannerId, BannerInput};

use crate::db::BannerRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

use super::require_fields;

/// Build the banners router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/banners", get(index).post(create))
        .route("/api/banners/{id}", put(update).delete(destroy))
}

fn not_found() -> AppError {
    AppError::NotFound("banner".to_string())
}

/// All banners, inactive ones included.
///
/// GET /api/banners
async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Banner>>> {
    Ok(Json(BannerRepository::new(state.pool()).list().await?))
}

/// POST /api/banners
async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(input): Json<BannerInput>,
) -> Result<(StatusCode, Json<Banner>)> {
    require_fields(&input.missing_fields())?;
    let banner = BannerRepository::new(state.pool()).create(input).await?;
    Ok((StatusCode::CREATED, Json(banner)))
}

/// PUT /api/banners/{id}
async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<BannerId>,
    Json(input): Json<BannerInput>,
) -> Result<Json<Banner>> {
    require_fields(&input.missing_fields())?;
    BannerRepository::new(state.pool())
        .update(id, input)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

/// DELETE /api/banners/{id}
async fn destroy(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<BannerId>,
) -> Result<StatusCode> {
    if BannerRepository::new(state.pool()).delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}
