//! Customer review handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use alqotari_core::{ProductId, Review, ReviewSubmission};

use crate::db::{ProductRepository, RepositoryError, ReviewRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

fn product_not_found() -> AppError {
    AppError::NotFound("Product".to_string())
}

/// Approved reviews of a visible product, newest first.
pub async fn index(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Vec<Review>>> {
    ProductRepository::new(state.pool())
        .get(id)
        .await?
        .filter(|p| p.is_visible)
        .ok_or_else(product_not_found)?;

    let reviews = ReviewRepository::new(state.pool())
        .list_approved_for_product(id)
        .await?;
    Ok(Json(reviews))
}

/// Submit a review for moderation.
pub async fn create(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(submission): Json<ReviewSubmission>,
) -> Result<(StatusCode, Json<Review>)> {
    ProductRepository::new(state.pool())
        .get(id)
        .await?
        .filter(|p| p.is_visible)
        .ok_or_else(product_not_found)?;

    let new_review = submission.into_new_review(id)?;
    let review = ReviewRepository::new(state.pool())
        .create(new_review)
        .await
        .map_err(|e| match e {
            // Product deleted between the check and the insert
            RepositoryError::NotFound => product_not_found(),
            other => other.into(),
        })?;

    Ok((StatusCode::CREATED, Json(review)))
}
