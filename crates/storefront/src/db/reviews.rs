//! Review repository.
//!
//! Submissions are stored unapproved; only approved reviews count toward a
//! product's rating or appear publicly.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use alqotari_core::{NewReview, ProductId, Rating, RatingSummary, Review, ReviewId};

use super::RepositoryError;

const REVIEW_COLUMNS: &str =
    "id, product_id, customer_name, rating, comment, is_approved, created_at";

#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: ReviewId,
    product_id: ProductId,
    customer_name: String,
    rating: i16,
    comment: Option<String>,
    is_approved: bool,
    created_at: DateTime<Utc>,
}

fn rating(id: ReviewId, value: i16) -> Result<Rating, RepositoryError> {
    Rating::new(i64::from(value)).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid rating for review {id}: {e}"))
    })
}

impl TryFrom<ReviewRow> for Review {
    type Error = RepositoryError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            product_id: row.product_id,
            customer_name: row.customer_name,
            rating: rating(row.id, row.rating)?,
            comment: row.comment,
            is_approved: row.is_approved,
            created_at: row.created_at,
        })
    }
}

/// Repository for review database operations.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(
        &self,
        product_id: Option<ProductId>,
        approved_only: bool,
        limit: Option<i64>,
    ) -> Result<Vec<Review>, RepositoryError> {
        let rows: Vec<ReviewRow> = sqlx::query_as(&format!(
            r"
            SELECT {REVIEW_COLUMNS} FROM catalog.review
            WHERE ($1::uuid IS NULL OR product_id = $1)
              AND (is_approved OR NOT $2)
            ORDER BY created_at DESC
            LIMIT $3
            "
        ))
        .bind(product_id)
        .bind(approved_only)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Approved reviews of a product, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list_approved_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Review>, RepositoryError> {
        self.fetch(Some(product_id), true, None).await
    }

    /// The newest approved reviews across all products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list_approved(&self, limit: i64) -> Result<Vec<Review>, RepositoryError> {
        self.fetch(None, true, Some(limit)).await
    }

    /// Every review, approved or not, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list_all(&self) -> Result<Vec<Review>, RepositoryError> {
        self.fetch(None, false, None).await
    }

    /// Store a new, unapproved review.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, review: NewReview) -> Result<Review, RepositoryError> {
        let row: ReviewRow = sqlx::query_as(&format!(
            r"
            INSERT INTO catalog.review (id, product_id, customer_name, rating, comment, is_approved)
            VALUES ($1, $2, $3, $4, $5, FALSE)
            RETURNING {REVIEW_COLUMNS}
            "
        ))
        .bind(ReviewId::generate())
        .bind(review.product_id)
        .bind(&review.customer_name)
        .bind(i16::from(review.rating))
        .bind(&review.comment)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                RepositoryError::NotFound
            }
            other => RepositoryError::Database(other),
        })?;

        tracing::info!(review_id = %row.id, product_id = %row.product_id, "Review submitted");
        row.try_into()
    }

    /// Approve a review. Returns `false` if no review has this ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn approve(&self, id: ReviewId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE catalog.review SET is_approved = TRUE WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a review. Returns `false` if no review has this ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ReviewId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM catalog.review WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Average approved rating of a product, rounded to one decimal.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored rating is out of range.
    pub async fn rating_summary(
        &self,
        product_id: ProductId,
    ) -> Result<RatingSummary, RepositoryError> {
        let values: Vec<i16> = sqlx::query_scalar(
            "SELECT rating FROM catalog.review WHERE product_id = $1 AND is_approved",
        )
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        let ratings = values
            .into_iter()
            .map(|v| {
                Rating::new(i64::from(v)).map_err(|e| {
                    RepositoryError::DataCorruption(format!(
                        "invalid rating for product {product_id}: {e}"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RatingSummary::from_ratings(ratings))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_rating_is_corruption() {
        let row = ReviewRow {
            id: ReviewId::generate(),
            product_id: ProductId::generate(),
            customer_name: "سالم".to_string(),
            rating: 9,
            comment: None,
            is_approved: true,
            created_at: Utc::now(),
        };
        assert!(matches!(
            Review::try_from(row),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
