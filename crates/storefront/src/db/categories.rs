//! Category repository.

use sqlx::{PgExecutor, PgPool};

use alqotari_core::{Category, CategoryId, CategoryInput};

use super::RepositoryError;
use super::products::ProductRepository;

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: CategoryId,
    name: String,
    slug: String,
    image: String,
    description: Option<String>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            image: row.image,
            description: row.description,
        }
    }
}

pub(crate) async fn insert(
    executor: impl PgExecutor<'_>,
    category: &Category,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO catalog.category (id, name, slug, image, description)
        VALUES ($1, $2, $3, $4, $5)
        ",
    )
    .bind(category.id)
    .bind(&category.name)
    .bind(&category.slug)
    .bind(&category.image)
    .bind(&category.description)
    .execute(executor)
    .await?;

    Ok(())
}

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows: Vec<CategoryRow> = sqlx::query_as(
            "SELECT id, name, slug, image, description FROM catalog.category ORDER BY seq",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get the first category with this slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>, RepositoryError> {
        let row: Option<CategoryRow> = sqlx::query_as(
            r"
            SELECT id, name, slug, image, description FROM catalog.category
            WHERE slug = $1
            ORDER BY seq
            LIMIT 1
            ",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Get a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let row: Option<CategoryRow> = sqlx::query_as(
            "SELECT id, name, slug, image, description FROM catalog.category WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: CategoryInput) -> Result<Category, RepositoryError> {
        let category = Category {
            id: CategoryId::generate(),
            name: input.name,
            slug: input.slug,
            image: input.image,
            description: input.description,
        };
        insert(self.pool, &category).await?;
        tracing::info!(category_id = %category.id, slug = %category.slug, "Category created");
        Ok(category)
    }

    /// Replace every editable field of a category.
    ///
    /// Products keep pointing at the old slug if it changes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: CategoryId,
        input: CategoryInput,
    ) -> Result<Option<Category>, RepositoryError> {
        let row: Option<CategoryRow> = sqlx::query_as(
            r"
            UPDATE catalog.category
            SET name = $2, slug = $3, image = $4, description = $5
            WHERE id = $1
            RETURNING id, name, slug, image, description
            ",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.image)
        .bind(&input.description)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Delete a category. Its products are left in place.
    ///
    /// Returns `false` if no category has this ID. Once the row is gone the
    /// delete stands; a failed orphan check is only logged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: CategoryId) -> Result<bool, RepositoryError> {
        let slug: Option<String> =
            sqlx::query_scalar("DELETE FROM catalog.category WHERE id = $1 RETURNING slug")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        let Some(slug) = slug else {
            return Ok(false);
        };

        match self.orphaned_products(&slug).await {
            Ok(Some(orphaned)) if orphaned > 0 => {
                tracing::warn!(
                    category_id = %id,
                    slug = %slug,
                    orphaned,
                    "Deleted category still has products"
                );
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(
                    category_id = %id,
                    slug = %slug,
                    error = %e,
                    "Category deleted but orphan check failed"
                );
            }
        }

        Ok(true)
    }

    /// Count products filed under `slug` when no category carries it.
    ///
    /// Returns `None` while another category still has the slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn orphaned_products(&self, slug: &str) -> Result<Option<i64>, RepositoryError> {
        if self.get_by_slug(slug).await?.is_some() {
            return Ok(None);
        }

        let count = ProductRepository::new(self.pool)
            .count_in_category(slug)
            .await?;
        Ok(Some(count))
    }
}
