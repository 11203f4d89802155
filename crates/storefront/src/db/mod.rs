//! Catalog persistence in `PostgreSQL`.
//!
//! # Schema: `catalog`
//!
//! ## Tables
//!
//! - `product` - Products with their size descriptor flattened into columns
//! - `category` - Browsable categories, referenced from products by slug
//! - `banner` - Home page promotional banners
//! - `review` - Customer reviews (moderated)
//! - `setting` - Key/value store settings (JSONB)
//!
//! The admin service reads and writes the same tables through these
//! repositories, so every write is visible to the next storefront read.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p alqotari-cli -- migrate storefront
//! ```

pub mod banners;
pub mod categories;
pub mod products;
pub mod reviews;
pub mod seed;
pub mod settings;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use banners::BannerRepository;
pub use categories::CategoryRepository;
pub use products::ProductRepository;
pub use reviews::ReviewRepository;
pub use seed::{CatalogSeed, SeedOutcome};
pub use settings::SettingsRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation.
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
