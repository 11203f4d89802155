//! Alqotari Core - shared catalog types and the product query engine.
//!
//! Used by every Alqotari component:
//! - `storefront` - public JSON API for the shop
//! - `admin` - authenticated catalog management API
//! - `cli` - migrations, seeding and admin accounts
//!
//! # Architecture
//!
//! No I/O lives here: no database access, no HTTP. Database mappings for the
//! ID and enum types are behind the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - IDs, prices, ratings, phone numbers and size taxonomies
//! - [`catalog`] - product, category, banner, review and settings records
//! - [`query`] - filtering, sorting and facets for the product listing
//! - [`collation`] - ordering for Arabic product names
//! - [`whatsapp`] - order message and deep link construction

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod collation;
pub mod query;
pub mod types;
pub mod whatsapp;

pub use catalog::*;
pub use query::{ProductQuery, SizeTypeFilter, SortBy, filter_products};
pub use types::*;
