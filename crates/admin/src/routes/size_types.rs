//! Size type reference data for the product editor.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use alqotari_core::{ProductSizes, SizeType};

use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Build the size types router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/size-types", get(index))
}

/// A size type with its display label and preset size lists.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeTypeInfo {
    pub value: SizeType,
    pub label: &'static str,
    pub defaults: ProductSizes,
}

fn size_types() -> Vec<SizeTypeInfo> {
    SizeType::ALL
        .iter()
        .map(|&size_type| SizeTypeInfo {
            value: size_type,
            label: size_type.label(),
            defaults: ProductSizes::default_for(size_type),
        })
        .collect()
}

/// GET /api/size-types
async fn index(RequireAdminAuth(_admin): RequireAdminAuth) -> Json<Vec<SizeTypeInfo>> {
    Json(size_types())
}
