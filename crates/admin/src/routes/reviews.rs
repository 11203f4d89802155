//! Review moderation handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};

use alqotari_core::{Review, ReviewId};

use crate::db::ReviewRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Build the reviews router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/reviews", get(index))
        .route("/api/reviews/{id}", delete(destroy))
        .route("/api/reviews/{id}/approve", post(approve))
}

fn not_found() -> AppError {
    AppError::NotFound("review".to_string())
}

/// Every review, pending and approved, newest first.
///
/// GET /api/reviews
async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Review>>> {
    Ok(Json(ReviewRepository::new(state.pool()).list_all().await?))
}

/// Publish a review.
///
/// POST /api/reviews/{id}/approve
async fn approve(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ReviewId>,
) -> Result<StatusCode> {
    if !ReviewRepository::new(state.pool()).approve(id).await? {
        return Err(not_found());
    }
    tracing::info!(admin_user_id = %admin.id, review_id = %id, "Review approved");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/reviews/{id}
async fn destroy(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ReviewId>,
) -> Result<StatusCode> {
    if !ReviewRepository::new(state.pool()).delete(id).await? {
        return Err(not_found());
    }
    tracing::info!(admin_user_id = %admin.id, review_id = %id, "Review deleted");
    Ok(StatusCode::NO_CONTENT)
}
