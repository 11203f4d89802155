//! Alqotari CLI - database migrations, catalog seeding and admin accounts.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! alq-cli migrate storefront
//! alq-cli migrate admin
//! alq-cli migrate all
//!
//! # Load the sample catalog (only if newer than the stored one)
//! alq-cli seed catalog data/catalog.yaml
//! alq-cli seed catalog data/catalog.yaml --force
//! alq-cli seed status
//!
//! # Manage admin accounts (password is read from stdin)
//! echo "$PASSWORD" | alq-cli admin create -e owner@alqotari.store -n "Owner"
//! echo "$PASSWORD" | alq-cli admin reset-password -e owner@alqotari.store
//! alq-cli admin list
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "alq-cli")]
#[command(author, version, about = "Alqotari CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        target: MigrateTarget,
    },
    /// Load catalog data
    Seed {
        #[command(subcommand)]
        action: SeedAction,
    },
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Run storefront (catalog) migrations
    Storefront,
    /// Run admin migrations
    Admin,
    /// Run all migrations
    All,
}

#[derive(Subcommand)]
enum SeedAction {
    /// Replace the catalog with a versioned YAML seed file
    Catalog {
        /// Path to the seed file
        file: String,

        /// Apply even if the stored catalog is at the same or a newer version
        #[arg(long)]
        force: bool,
    },
    /// Show the version of the last applied catalog seed
    Status,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin user
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin display name
        #[arg(short, long)]
        name: String,
    },
    /// Set a new password for an admin user
    ResetPassword {
        /// Admin email address
        #[arg(short, long)]
        email: String,
    },
    /// List admin users
    List,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { target } => match target {
            MigrateTarget::Storefront => commands::migrate::storefront().await?,
            MigrateTarget::Admin => commands::migrate::admin().await?,
            MigrateTarget::All => {
                commands::migrate::storefront().await?;
                commands::migrate::admin().await?;
            }
        },
        Commands::Seed { action } => match action {
            SeedAction::Catalog { file, force } => commands::seed::catalog(&file, force).await?,
            SeedAction::Status => commands::seed::status().await?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Create { email, name } => {
                commands::admin::create_user(&email, &name).await?;
            }
            AdminAction::ResetPassword { email } => {
                commands::admin::reset_password(&email).await?;
            }
            AdminAction::List => commands::admin::list_users().await?,
        },
    }
    Ok(())
}
