//! Home page route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use alqotari_core::query::{CategoryCount, category_counts, featured_products};
use alqotari_core::{Banner, Review, StoreSettings};

use super::products::ProductView;
use crate::db::{
    BannerRepository, CategoryRepository, ProductRepository, ReviewRepository, SettingsRepository,
};
use crate::error::Result;
use crate::state::AppState;

/// Number of approved reviews shown as testimonials.
pub const TESTIMONIALS_LIMIT: i64 = 6;

/// Everything the home page renders.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    pub settings: StoreSettings,
    pub banners: Vec<Banner>,
    pub categories: Vec<CategoryCount>,
    pub featured: Vec<ProductView>,
    pub testimonials: Vec<Review>,
}

/// Home page data: store details, active banners, categories, featured
/// products and recent testimonials.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<Json<HomeResponse>> {
    let pool = state.pool();
    let settings = SettingsRepository::new(pool).get().await?;
    let banners = BannerRepository::new(pool).list_active().await?;
    let categories = CategoryRepository::new(pool).list().await?;
    let catalog = ProductRepository::new(pool).list().await?;
    let testimonials = ReviewRepository::new(pool)
        .list_approved(TESTIMONIALS_LIMIT)
        .await?;

    Ok(Json(HomeResponse {
        settings,
        banners,
        categories: category_counts(&catalog, &categories),
        featured: featured_products(&catalog)
            .into_iter()
            .map(ProductView::from)
            .collect(),
        testimonials,
    }))
}
