//! Settings database operations.
//!
//! Settings are JSONB values keyed by name. Store contact details live under
//! [`STORE_SETTINGS_KEY`]; the version of the last seeded sample catalog under
//! [`CATALOG_SEED_VERSION_KEY`].

use serde_json::Value as JsonValue;
use sqlx::{PgExecutor, PgPool};

use alqotari_core::StoreSettings;

use super::RepositoryError;

/// Key of the store settings document.
pub const STORE_SETTINGS_KEY: &str = "store_settings";

/// Key of the last applied catalog seed version.
pub const CATALOG_SEED_VERSION_KEY: &str = "catalog_seed_version";

/// Get a raw setting value.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn get_setting(
    executor: impl PgExecutor<'_>,
    key: &str,
) -> Result<Option<JsonValue>, sqlx::Error> {
    sqlx::query_scalar("SELECT value FROM catalog.setting WHERE key = $1")
        .bind(key)
        .fetch_optional(executor)
        .await
}

/// Set a raw setting value, replacing any existing one.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn set_setting(
    executor: impl PgExecutor<'_>,
    key: &str,
    value: &JsonValue,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO catalog.setting (key, value)
        VALUES ($1, $2)
        ON CONFLICT (key) DO UPDATE SET value = $2, updated_at = NOW()
        ",
    )
    .bind(key)
    .bind(value)
    .execute(executor)
    .await?;

    Ok(())
}

/// Repository for typed settings.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load the store settings, or the defaults if none were ever saved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored document is invalid.
    pub async fn get(&self) -> Result<StoreSettings, RepositoryError> {
        let Some(value) = get_setting(self.pool, STORE_SETTINGS_KEY).await? else {
            return Ok(StoreSettings::default());
        };

        serde_json::from_value(value)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid store settings: {e}")))
    }

    /// Save the store settings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn save(&self, settings: &StoreSettings) -> Result<(), RepositoryError> {
        let value = serde_json::to_value(settings)
            .map_err(|e| RepositoryError::DataCorruption(format!("unserializable settings: {e}")))?;
        set_setting(self.pool, STORE_SETTINGS_KEY, &value).await?;
        tracing::info!(store_name = %settings.store_name, "Store settings saved");
        Ok(())
    }

    /// Version of the last seeded sample catalog, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored value is not a version.
    pub async fn catalog_seed_version(&self) -> Result<Option<u32>, RepositoryError> {
        get_setting(self.pool, CATALOG_SEED_VERSION_KEY)
            .await?
            .map(parse_seed_version)
            .transpose()
    }
}

pub(crate) fn parse_seed_version(value: JsonValue) -> Result<u32, RepositoryError> {
    serde_json::from_value(value)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid catalog seed version: {e}")))
}
