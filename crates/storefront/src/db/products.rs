//! Product repository.
//!
//! The size descriptor is stored flattened: a nullable `size_type` column plus
//! three text arrays. A NULL `size_type` means the product has no descriptor.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgExecutor, PgPool};

use alqotari_core::{Price, Product, ProductId, ProductInput, ProductSizes, SizeType};

use super::RepositoryError;

const PRODUCT_COLUMNS: &str = "id, name, description, price, original_price, image, category, \
     in_stock, quantity, featured, is_visible, size_type, available_sizes, available_lengths, \
     available_widths, created_at, updated_at";

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    description: String,
    price: Decimal,
    original_price: Option<Decimal>,
    image: String,
    category: String,
    in_stock: bool,
    quantity: Option<i64>,
    featured: bool,
    is_visible: bool,
    size_type: Option<SizeType>,
    available_sizes: Vec<String>,
    available_lengths: Vec<String>,
    available_widths: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn price(id: ProductId, amount: Decimal) -> Result<Price, RepositoryError> {
    Price::new(amount).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid price for product {id}: {e}"))
    })
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let quantity = row
            .quantity
            .map(u32::try_from)
            .transpose()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!(
                    "invalid quantity for product {}: {e}",
                    row.id
                ))
            })?;

        let sizes = row.size_type.map(|size_type| ProductSizes {
            size_type,
            available_sizes: row.available_sizes,
            available_lengths: row.available_lengths,
            available_widths: row.available_widths,
        });

        Ok(Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: price(row.id, row.price)?,
            original_price: row.original_price.map(|p| price(row.id, p)).transpose()?,
            image: row.image,
            category: row.category,
            in_stock: row.in_stock,
            quantity,
            featured: row.featured,
            is_visible: row.is_visible,
            sizes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insert a fully-formed product.
///
/// Shared with catalog seeding, which runs inside a transaction.
pub(crate) async fn insert(
    executor: impl PgExecutor<'_>,
    product: &Product,
) -> Result<(), sqlx::Error> {
    let sizes = product.sizes.as_ref();
    sqlx::query(
        r"
        INSERT INTO catalog.product (
            id, name, description, price, original_price, image, category,
            in_stock, quantity, featured, is_visible,
            size_type, available_sizes, available_lengths, available_widths,
            created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
        ",
    )
    .bind(product.id)
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price.amount())
    .bind(product.original_price.map(|p| p.amount()))
    .bind(&product.image)
    .bind(&product.category)
    .bind(product.in_stock)
    .bind(product.quantity.map(i64::from))
    .bind(product.featured)
    .bind(product.is_visible)
    .bind(sizes.map(|s| s.size_type))
    .bind(sizes.map(|s| s.available_sizes.clone()).unwrap_or_default())
    .bind(sizes.map(|s| s.available_lengths.clone()).unwrap_or_default())
    .bind(sizes.map(|s| s.available_widths.clone()).unwrap_or_default())
    .bind(product.created_at)
    .bind(product.updated_at)
    .execute(executor)
    .await?;

    Ok(())
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every product, hidden ones included, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM catalog.product ORDER BY seq"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a product by ID, whether visible or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the row is invalid.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM catalog.product WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a product from admin input.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: ProductInput) -> Result<Product, RepositoryError> {
        let product = Product::from_input(input, Utc::now());
        insert(self.pool, &product).await?;
        tracing::info!(product_id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Replace every editable field of a product.
    ///
    /// Returns `None` if no product has this ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn update(
        &self,
        id: ProductId,
        input: ProductInput,
    ) -> Result<Option<Product>, RepositoryError> {
        let sizes = input.sizes.as_ref();
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            r"
            UPDATE catalog.product SET
                name = $2, description = $3, price = $4, original_price = $5,
                image = $6, category = $7, in_stock = $8, quantity = $9,
                featured = $10, is_visible = $11, size_type = $12,
                available_sizes = $13, available_lengths = $14, available_widths = $15,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price.amount())
        .bind(input.original_price.map(|p| p.amount()))
        .bind(&input.image)
        .bind(&input.category)
        .bind(input.in_stock)
        .bind(input.quantity.map(i64::from))
        .bind(input.featured)
        .bind(input.is_visible)
        .bind(sizes.map(|s| s.size_type))
        .bind(sizes.map(|s| s.available_sizes.clone()).unwrap_or_default())
        .bind(sizes.map(|s| s.available_lengths.clone()).unwrap_or_default())
        .bind(sizes.map(|s| s.available_widths.clone()).unwrap_or_default())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Delete a product and its reviews.
    ///
    /// Returns `false` if no product has this ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM catalog.product WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of products filed under a category slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_in_category(&self, slug: &str) -> Result<i64, RepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM catalog.product WHERE category = $1")
                .bind(slug)
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }
}
