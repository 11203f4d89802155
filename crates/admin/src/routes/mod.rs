//! HTTP route handlers for the admin JSON API.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! POST   /api/auth/login               - Email + password login (rate limited)
//! POST   /api/auth/logout              - Logout
//! GET    /api/auth/me                  - Current admin
//!
//! # Catalog (login required)
//! GET    /api/products                 - All products, hidden included
//! POST   /api/products                 - Create product
//! PUT    /api/products/{id}            - Replace product
//! DELETE /api/products/{id}            - Delete product and its reviews
//! GET    /api/categories               - Categories
//! POST   /api/categories               - Create category
//! PUT    /api/categories/{id}          - Replace category
//! DELETE /api/categories/{id}          - Delete category (products are kept)
//! GET    /api/banners                  - Banners
//! POST   /api/banners                  - Create banner
//! PUT    /api/banners/{id}             - Replace banner
//! DELETE /api/banners/{id}             - Delete banner
//! GET    /api/size-types               - Size types with labels and default sizes
//!
//! # Store (login required)
//! GET    /api/settings                 - Store settings
//! PUT    /api/settings                 - Save store settings
//! GET    /api/reviews                  - All reviews, newest first
//! POST   /api/reviews/{id}/approve     - Approve review
//! DELETE /api/reviews/{id}             - Delete review
//! ```

pub mod auth;
pub mod banners;
pub mod categories;
pub mod products;
pub mod reviews;
pub mod settings;
pub mod size_types;

use axum::Router;

use crate::state::AppState;

/// Create all routes for admin.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(products::router())
        .merge(categories::router())
        .merge(banners::router())
        .merge(settings::router())
        .merge(reviews::router())
        .merge(size_types::router())
}

/// Reject an input whose required fields are blank.
fn require_fields(missing: &[&'static str]) -> crate::error::Result<()> {
    if missing.is_empty() {
        Ok(())
    } else {
        Err(crate::error::AppError::BadRequest(format!(
            "missing required fields: {}",
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_fields_lists_missing() {
        assert!(require_fields(&[]).is_ok());
        let err = require_fields(&["name", "price"]).unwrap_err();
        assert_eq!(err.to_string(), "Bad request: missing required fields: name, price");
    }
}
