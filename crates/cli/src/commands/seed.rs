//! Versioned catalog seeding.
//!
//! Reads a YAML catalog, validates it before touching the database, then
//! replaces the stored catalog if the file's `version` is newer than the one
//! recorded by the previous seed.

use std::path::Path;

use tracing::{error, info};

use alqotari_storefront::db::{self, CatalogSeed, SeedOutcome, SettingsRepository};

use super::database_url;

/// Seed the catalog from a YAML file.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the file cannot be read
/// or parsed, validation fails, or a database operation fails.
pub async fn catalog(file_path: &str, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let url = database_url("STOREFRONT_DATABASE_URL")?;

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading catalog seed");

    // Read and validate YAML before connecting to database
    let content = tokio::fs::read_to_string(path).await?;
    let seed = CatalogSeed::from_yaml(&content)?;

    info!(
        version = seed.version,
        categories = seed.categories.len(),
        products = seed.products.len(),
        banners = seed.banners.len(),
        "Parsed catalog seed"
    );

    let errors = seed.validate();
    if !errors.is_empty() {
        error!("Catalog seed validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    let pool = db::create_pool(&url).await?;
    info!("Connected to database");

    match seed.apply(&pool, force).await? {
        SeedOutcome::Applied {
            categories,
            products,
            banners,
        } => {
            info!("Catalog replaced with seed version {}", seed.version);
            info!("  Categories: {categories}");
            info!("  Products: {products}");
            info!("  Banners: {banners}");
        }
        SeedOutcome::Skipped { current } => {
            info!(
                "Catalog is already at version {current}; seed version {} not applied (use --force to override)",
                seed.version
            );
        }
    }

    Ok(())
}

/// Show which catalog seed version is stored.
///
/// # Errors
///
/// Returns an error if the database URL is missing or the query fails.
pub async fn status() -> Result<(), Box<dyn std::error::Error>> {
    let url = database_url("STOREFRONT_DATABASE_URL")?;
    let pool = db::create_pool(&url).await?;

    match SettingsRepository::new(&pool).catalog_seed_version().await? {
        Some(version) => info!("Catalog seed version: {version}"),
        None => info!("No catalog seed has been applied"),
    }

    Ok(())
}
