//! Database operations for admin.
//!
//! # Schema: `admin`
//!
//! - `admin_user` - Admin accounts with argon2id password hashes
//! - `session` - tower-sessions storage
//!
//! Catalog tables belong to the storefront (`catalog` schema); this crate
//! edits them through the storefront repositories re-exported here.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p alqotari-cli -- migrate admin
//! ```

pub mod admin_users;

pub use admin_users::AdminUserRepository;
pub use alqotari_storefront::db::{
    BannerRepository, CategoryRepository, ProductRepository, RepositoryError, ReviewRepository,
    SettingsRepository, create_pool,
};
