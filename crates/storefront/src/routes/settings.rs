//! Public store settings.

use axum::{Json, extract::State};

use alqotari_core::StoreSettings;

use crate::db::SettingsRepository;
use crate::error::Result;
use crate::state::AppState;

/// Store name, contact numbers and social links.
pub async fn show(State(state): State<AppState>) -> Result<Json<StoreSettings>> {
    Ok(Json(SettingsRepository::new(state.pool()).get().await?))
}
