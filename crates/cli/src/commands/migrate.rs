//! Database migration commands.
//!
//! Storefront migrations (`crates/storefront/migrations/`) own the `catalog`
//! schema; admin migrations (`crates/admin/migrations/`) own the `admin`
//! schema. Both may point at the same database, where they share one
//! migrations table; each set ignores versions applied by the other.
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string for the catalog
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string for admin data
//! - `DATABASE_URL` - Fallback for either

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use thiserror::Error;

use super::{MissingEnvVar, database_url};

fn shared(mut migrator: Migrator) -> Migrator {
    migrator.set_ignore_missing(true);
    migrator
}

/// Migrations for the `catalog` schema.
#[must_use]
pub fn storefront_migrator() -> Migrator {
    shared(sqlx::migrate!("../storefront/migrations"))
}

/// Migrations for the `admin` schema.
#[must_use]
pub fn admin_migrator() -> Migrator {
    shared(sqlx::migrate!("../admin/migrations"))
}

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error(transparent)]
    MissingEnvVar(#[from] MissingEnvVar),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

async fn run(
    name: &str,
    env_key: &'static str,
    migrator: &Migrator,
) -> Result<(), MigrationError> {
    let url = database_url(env_key)?;

    tracing::info!("Connecting to {name} database...");
    let pool = PgPool::connect(url.expose_secret()).await?;

    tracing::info!("Running {name} migrations...");
    migrator.run(&pool).await?;

    tracing::info!("{name} migrations complete");
    Ok(())
}

/// Run storefront database migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails, or
/// a migration fails.
pub async fn storefront() -> Result<(), MigrationError> {
    run("storefront", "STOREFRONT_DATABASE_URL", &storefront_migrator()).await
}

/// Run admin database migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails, or
/// a migration fails.
pub async fn admin() -> Result<(), MigrationError> {
    run("admin", "ADMIN_DATABASE_URL", &admin_migrator()).await
}
