//! Versioned sample-catalog seeding.
//!
//! A seed file carries a `version`. Applying it replaces every category,
//! product and banner in one transaction, but only when the file is newer than
//! the version recorded by the last seed (unless forced). Reviews of replaced
//! products go with them.

use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;

use alqotari_core::{
    Banner, BannerId, BannerInput, Category, CategoryId, CategoryInput, Product, ProductInput,
    StoreSettings,
};

use super::settings::{CATALOG_SEED_VERSION_KEY, STORE_SETTINGS_KEY, parse_seed_version};
use super::{RepositoryError, banners, categories, products, settings};

/// Contents of a catalog seed file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSeed {
    pub version: u32,
    #[serde(default)]
    pub settings: Option<StoreSettings>,
    #[serde(default)]
    pub categories: Vec<CategoryInput>,
    #[serde(default)]
    pub products: Vec<ProductInput>,
    #[serde(default)]
    pub banners: Vec<BannerInput>,
}

/// What applying a seed did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The catalog was replaced.
    Applied {
        categories: usize,
        products: usize,
        banners: usize,
    },
    /// The stored catalog is already at this version or newer.
    Skipped { current: u32 },
}

impl CatalogSeed {
    /// Parse a seed file.
    ///
    /// # Errors
    ///
    /// Returns the YAML error if the document does not match the seed layout.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Describe every entry with a blank required field.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut report = |kind: &str, index: usize, missing: Vec<&'static str>| {
            if !missing.is_empty() {
                errors.push(format!("{kind} #{}: missing {}", index + 1, missing.join(", ")));
            }
        };
        for (i, c) in self.categories.iter().enumerate() {
            report("category", i, c.missing_fields());
        }
        for (i, p) in self.products.iter().enumerate() {
            report("product", i, p.missing_fields());
        }
        for (i, b) in self.banners.iter().enumerate() {
            report("banner", i, b.missing_fields());
        }
        errors
    }

    /// Whether a catalog recorded at `current` should be replaced by this seed.
    #[must_use]
    pub fn supersedes(&self, current: Option<u32>, force: bool) -> bool {
        force || current.is_none_or(|c| self.version > c)
    }

    /// Replace the catalog with this seed if it supersedes the stored one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; nothing is
    /// changed in that case.
    pub async fn apply(&self, pool: &PgPool, force: bool) -> Result<SeedOutcome, RepositoryError> {
        let mut tx = pool.begin().await?;

        let current = settings::get_setting(&mut *tx, CATALOG_SEED_VERSION_KEY)
            .await?
            .map(parse_seed_version)
            .transpose()?;

        if !self.supersedes(current, force) {
            let current = current.unwrap_or(self.version);
            tracing::info!(current, seed = self.version, "Catalog seed already applied");
            return Ok(SeedOutcome::Skipped { current });
        }

        sqlx::query("DELETE FROM catalog.product")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM catalog.category")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM catalog.banner")
            .execute(&mut *tx)
            .await?;

        for input in &self.categories {
            let category = Category {
                id: CategoryId::generate(),
                name: input.name.clone(),
                slug: input.slug.clone(),
                image: input.image.clone(),
                description: input.description.clone(),
            };
            categories::insert(&mut *tx, &category).await?;
        }

        let now = Utc::now();
        for input in &self.products {
            let product = Product::from_input(input.clone(), now);
            products::insert(&mut *tx, &product).await?;
        }

        for input in &self.banners {
            let banner = Banner {
                id: BannerId::generate(),
                image: input.image.clone(),
                title: input.title.clone(),
                subtitle: input.subtitle.clone(),
                link: input.link.clone(),
                is_active: input.is_active,
            };
            banners::insert(&mut *tx, &banner).await?;
        }

        if let Some(store) = &self.settings {
            let value = serde_json::to_value(store).map_err(|e| {
                RepositoryError::DataCorruption(format!("unserializable settings: {e}"))
            })?;
            settings::set_setting(&mut *tx, STORE_SETTINGS_KEY, &value).await?;
        }

        settings::set_setting(
            &mut *tx,
            CATALOG_SEED_VERSION_KEY,
            &serde_json::Value::from(self.version),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            previous = ?current,
            version = self.version,
            categories = self.categories.len(),
            products = self.products.len(),
            banners = self.banners.len(),
            "Catalog seed applied"
        );

        Ok(SeedOutcome::Applied {
            categories: self.categories.len(),
            products: self.products.len(),
            banners: self.banners.len(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use alqotari_core::SizeType;

    const SEED: &str = r#"
version: 3
categories:
  - name: شيلات
    slug: shawls
  - name: أثواب
    slug: thobes
products:
  - name: شال كشمير
    price: "15000"
    category: shawls
    sizes:
      type: shawl
      availableSizes: ["56", "58"]
  - name: ثوب
    price: 9000
    category: thobes
    featured: true
banners:
  - image: /banner.jpg
    title: تخفيضات
"#;

    #[test]
    fn test_parse_seed() {
        let seed = CatalogSeed::from_yaml(SEED).unwrap();
        assert_eq!(seed.version, 3);
        assert_eq!(seed.categories.len(), 2);
        assert_eq!(seed.products.len(), 2);
        assert!(seed.products[1].featured);
        assert!(seed.products[1].is_visible);
        assert_eq!(
            seed.products[0].sizes.as_ref().unwrap().size_type,
            SizeType::Shawl
        );
        assert!(seed.banners[0].is_active);
        assert!(seed.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_blank_fields() {
        let mut seed = CatalogSeed::from_yaml(SEED).unwrap();
        seed.products[1].category = String::new();
        seed.categories[0].slug = " ".to_string();
        assert_eq!(
            seed.validate(),
            vec!["category #1: missing slug", "product #2: missing category"]
        );
    }

    #[test]
    fn test_supersedes() {
        let seed = CatalogSeed::from_yaml(SEED).unwrap();
        assert!(seed.supersedes(None, false));
        assert!(seed.supersedes(Some(2), false));
        assert!(!seed.supersedes(Some(3), false));
        assert!(!seed.supersedes(Some(4), false));
        assert!(seed.supersedes(Some(4), true));
    }
}
