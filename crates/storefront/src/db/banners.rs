//! Banner repository.

use sqlx::{PgExecutor, PgPool};

use alqotari_core::{Banner, BannerId, BannerInput};

use super::RepositoryError;

#[derive(Debug, sqlx::FromRow)]
struct BannerRow {
    id: BannerId,
    image: String,
    title: String,
    subtitle: Option<String>,
    link: String,
    is_active: bool,
}

impl From<BannerRow> for Banner {
    fn from(row: BannerRow) -> Self {
        Self {
            id: row.id,
            image: row.image,
            title: row.title,
            subtitle: row.subtitle,
            link: row.link,
            is_active: row.is_active,
        }
    }
}

pub(crate) async fn insert(
    executor: impl PgExecutor<'_>,
    banner: &Banner,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO catalog.banner (id, image, title, subtitle, link, is_active)
        VALUES ($1, $2, $3, $4, $5, $6)
        ",
    )
    .bind(banner.id)
    .bind(&banner.image)
    .bind(&banner.title)
    .bind(&banner.subtitle)
    .bind(&banner.link)
    .bind(banner.is_active)
    .execute(executor)
    .await?;

    Ok(())
}

/// Repository for banner database operations.
pub struct BannerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BannerRepository<'a> {
    /// Create a new banner repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all banners in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Banner>, RepositoryError> {
        let rows: Vec<BannerRow> = sqlx::query_as(
            "SELECT id, image, title, subtitle, link, is_active FROM catalog.banner ORDER BY seq",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List banners shown on the home page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(&self) -> Result<Vec<Banner>, RepositoryError> {
        let rows: Vec<BannerRow> = sqlx::query_as(
            r"
            SELECT id, image, title, subtitle, link, is_active FROM catalog.banner
            WHERE is_active
            ORDER BY seq
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a banner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: BannerInput) -> Result<Banner, RepositoryError> {
        let banner = Banner {
            id: BannerId::generate(),
            image: input.image,
            title: input.title,
            subtitle: input.subtitle,
            link: input.link,
            is_active: input.is_active,
        };
        insert(self.pool, &banner).await?;
        Ok(banner)
    }

    /// Replace every editable field of a banner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: BannerId,
        input: BannerInput,
    ) -> Result<Option<Banner>, RepositoryError> {
        let row: Option<BannerRow> = sqlx::query_as(
            r"
            UPDATE catalog.banner
            SET image = $2, title = $3, subtitle = $4, link = $5, is_active = $6
            WHERE id = $1
            RETURNING id, image, title, subtitle, link, is_active
            ",
        )
        .bind(id)
        .bind(&input.image)
        .bind(&input.title)
        .bind(&input.subtitle)
        .bind(&input.link)
        .bind(input.is_active)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Delete a banner. Returns `false` if no banner has this ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: BannerId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM catalog.banner WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
