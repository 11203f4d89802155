//! Admin user management commands.
//!
//! Passwords are read from the first line of stdin so they stay out of shell
//! history and process listings.
//!
//! # Environment Variables
//!
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

use std::io::BufRead;

use thiserror::Error;

use alqotari_admin::db::{self, AdminUserRepository};
use alqotari_admin::services::{AdminAuthError, AdminAuthService};

use super::{MissingEnvVar, database_url};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    MissingEnvVar(#[from] MissingEnvVar),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Could not read password from stdin: {0}")]
    Stdin(#[from] std::io::Error),

    #[error("No password given on stdin")]
    EmptyPassword,

    #[error(transparent)]
    Auth(#[from] AdminAuthError),

    #[error("Repository error: {0}")]
    Repository(#[from] db::RepositoryError),
}

fn read_password() -> Result<String, AdminError> {
    tracing::info!("Reading password from stdin...");
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_owned();
    if password.is_empty() {
        return Err(AdminError::EmptyPassword);
    }
    Ok(password)
}

async fn connect() -> Result<sqlx::PgPool, AdminError> {
    let url = database_url("ADMIN_DATABASE_URL")?;
    tracing::info!("Connecting to admin database...");
    Ok(db::create_pool(&url).await?)
}

/// Create a new admin user.
///
/// # Errors
///
/// Returns an error if the password is missing or weak, the email is invalid
/// or taken, or the database is unreachable.
pub async fn create_user(email: &str, name: &str) -> Result<(), AdminError> {
    let password = read_password()?;
    let pool = connect().await?;

    let user = AdminAuthService::new(&pool)
        .create_admin(email, name, &password)
        .await?;

    tracing::info!(
        "Admin user created successfully! ID: {}, Email: {}",
        user.id,
        user.email
    );
    Ok(())
}

/// Replace an admin user's password.
///
/// # Errors
///
/// Returns an error if the password is missing or weak, no admin has this
/// email, or the database is unreachable.
pub async fn reset_password(email: &str) -> Result<(), AdminError> {
    let password = read_password()?;
    let pool = connect().await?;

    AdminAuthService::new(&pool)
        .reset_password(email, &password)
        .await?;

    tracing::info!("Password updated for {email}");
    Ok(())
}

/// List admin users.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn list_users() -> Result<(), AdminError> {
    let pool = connect().await?;
    let users = AdminUserRepository::new(&pool).list_all().await?;

    if users.is_empty() {
        tracing::info!("No admin users");
    }
    for user in users {
        tracing::info!("{}  {}  {}", user.id, user.email, user.name);
    }
    Ok(())
}
