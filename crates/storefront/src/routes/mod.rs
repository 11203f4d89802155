//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /api/home                       - Settings, banners, categories, featured, testimonials
//!
//! # Products
//! GET  /api/products                   - Filtered listing with facets and category counts
//! GET  /api/products/{id}              - Product detail (404 when hidden)
//! GET  /api/products/{id}/order-link   - WhatsApp order link (?size=&length=&width=)
//! GET  /api/products/{id}/reviews      - Approved reviews, newest first
//! POST /api/products/{id}/reviews      - Submit a review (rate limited)
//!
//! # Store
//! GET  /api/categories                 - Categories with visible product counts
//! GET  /api/settings                   - Public store settings
//! ```

pub mod categories;
pub mod home;
pub mod products;
pub mod reviews;
pub mod settings;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::submission_rate_limiter;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route("/{id}/order-link", get(products::order_link))
        .route(
            "/{id}/reviews",
            get(reviews::index).merge(post(reviews::create).layer(submission_rate_limiter())),
        )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/home", get(home::home))
        .nest("/api/products", product_routes())
        .route("/api/categories", get(categories::index))
        .route("/api/settings", get(settings::show))
}
