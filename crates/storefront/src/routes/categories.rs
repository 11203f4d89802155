//! Category route handlers.

use axum::{Json, extract::State};

use alqotari_core::query::{CategoryCount, category_counts};

use crate::db::{CategoryRepository, ProductRepository};
use crate::error::Result;
use crate::state::AppState;

/// List categories with the number of visible products in each.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<CategoryCount>>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    let catalog = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(category_counts(&catalog, &categories)))
}
