//! Store settings handlers.

use axum::{Json, Router, extract::State, routing::get};

use alqotari_core::StoreSettings;

use crate::db::SettingsRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/settings", get(show).put(update))
}

/// GET /api/settings
async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<StoreSettings>> {
    Ok(Json(SettingsRepository::new(state.pool()).get().await?))
}

/// Replace the store settings.
///
/// PUT /api/settings
async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(settings): Json<StoreSettings>,
) -> Result<Json<StoreSettings>> {
    if settings.store_name.trim().is_empty() {
        return Err(AppError::BadRequest("store name is required".to_string()));
    }
    SettingsRepository::new(state.pool()).save(&settings).await?;
    tracing::info!(admin_user_id = %admin.id, "Store settings updated by admin");
    Ok(Json(settings))
}
