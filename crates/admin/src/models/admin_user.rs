//! Admin user domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use alqotari_core::{AdminUserId, Email};

/// An admin user who may manage the catalog.
///
/// The password hash never leaves the repository layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: AdminUserId,
    pub email: Email,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
