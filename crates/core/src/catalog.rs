//! Catalog records: products, categories, banners, reviews and store settings.
//!
//! These are plain records. The store applies presence checks only; category
//! slugs on products are not enforced as foreign keys, and `original_price`
//! is not required to exceed `price`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{
    BannerId, CategoryId, PhoneNumber, Price, ProductId, ProductSizes, Rating, ReviewId, SizeType,
};

/// Store name used until the admin saves settings.
pub const DEFAULT_STORE_NAME: &str = "القوطاري للتجارة";

/// WhatsApp number used until the admin saves settings.
pub const DEFAULT_WHATSAPP_NUMBER: &str = "+967736700034";

const DEFAULT_STORE_DESCRIPTION: &str = "متجر متخصص في الشيلان والأزياء التقليدية الفاخرة";

const fn default_true() -> bool {
    true
}

// =============================================================================
// Products
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub original_price: Option<Price>,
    /// Image URL.
    pub image: String,
    /// Slug of the owning category.
    pub category: String,
    pub in_stock: bool,
    /// Units on hand. When set, this supersedes `in_stock`.
    pub quantity: Option<u32>,
    pub featured: bool,
    /// Hidden products never appear in customer-facing results.
    pub is_visible: bool,
    pub sizes: Option<ProductSizes>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a product from admin input with a fresh ID and timestamps.
    #[must_use]
    pub fn from_input(input: ProductInput, now: DateTime<Utc>) -> Self {
        Self {
            id: ProductId::generate(),
            name: input.name,
            description: input.description,
            price: input.price,
            original_price: input.original_price,
            image: input.image,
            category: input.category,
            in_stock: input.in_stock,
            quantity: input.quantity,
            featured: input.featured,
            is_visible: input.is_visible,
            sizes: input.sizes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the product can be ordered right now.
    ///
    /// A defined quantity wins over the `in_stock` flag.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.quantity.map_or(self.in_stock, |q| q > 0)
    }

    /// The product's size scheme, if it has one.
    #[must_use]
    pub fn size_type(&self) -> Option<SizeType> {
        self.sizes.as_ref().map(|s| s.size_type)
    }

    /// Whether the product has a size scheme other than `none`.
    #[must_use]
    pub fn is_sized(&self) -> bool {
        self.size_type().is_some_and(SizeType::is_sized)
    }

    /// Whole-percent discount against `original_price`, if there is one.
    #[must_use]
    pub fn discount_percentage(&self) -> Option<u32> {
        self.original_price
            .and_then(|original| self.price.discount_percentage_from(original))
    }
}

/// Editable product fields, as submitted by the admin console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub original_price: Option<Price>,
    #[serde(default)]
    pub image: String,
    pub category: String,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    #[serde(default)]
    pub sizes: Option<ProductSizes>,
}

impl ProductInput {
    /// Names of required fields left blank.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.category.trim().is_empty() {
            missing.push("category");
        }
        missing
    }
}

// =============================================================================
// Categories
// =============================================================================

/// A browsable product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Referenced by [`Product::category`]. Uniqueness is not enforced.
    pub slug: String,
    pub image: String,
    pub description: Option<String>,
}

/// Editable category fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CategoryInput {
    /// Names of required fields left blank.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.slug.trim().is_empty() {
            missing.push("slug");
        }
        missing
    }
}

// =============================================================================
// Banners
// =============================================================================

/// A promotional banner on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: BannerId,
    pub image: String,
    pub title: String,
    pub subtitle: Option<String>,
    /// Where the banner links to, usually a filtered product listing.
    pub link: String,
    pub is_active: bool,
}

/// Editable banner fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerInput {
    pub image: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub link: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl BannerInput {
    /// Names of required fields left blank.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.image.trim().is_empty() {
            missing.push("image");
        }
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        missing
    }
}

// =============================================================================
// Reviews
// =============================================================================

/// A customer review. Only approved reviews are shown publicly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub customer_name: String,
    pub rating: Rating,
    pub comment: Option<String>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Longest customer name a review may carry, in characters.
pub const MAX_REVIEW_NAME_CHARS: usize = 50;

/// Longest review comment, in characters.
pub const MAX_REVIEW_COMMENT_CHARS: usize = 500;

/// Errors in a customer's review submission.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    /// The customer name is blank.
    #[error("customer name is required")]
    MissingName,

    #[error("customer name must be at most {} characters", MAX_REVIEW_NAME_CHARS)]
    NameTooLong,

    #[error("comment must be at most {} characters", MAX_REVIEW_COMMENT_CHARS)]
    CommentTooLong,
}

/// A review as submitted by a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmission {
    pub customer_name: String,
    pub rating: Rating,
    #[serde(default)]
    pub comment: Option<String>,
}

/// A submission that passed presence checks, ready to store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub product_id: ProductId,
    pub customer_name: String,
    pub rating: Rating,
    pub comment: Option<String>,
}

impl ReviewSubmission {
    /// Trim the submission and attach it to a product.
    ///
    /// A comment that is blank after trimming is dropped. Lengths are counted
    /// in characters after trimming.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::MissingName`] if the name is blank, and
    /// [`ReviewError::NameTooLong`] or [`ReviewError::CommentTooLong`] if a
    /// field exceeds its limit.
    pub fn into_new_review(self, product_id: ProductId) -> Result<NewReview, ReviewError> {
        let customer_name = self.customer_name.trim();
        if customer_name.is_empty() {
            return Err(ReviewError::MissingName);
        }
        if customer_name.chars().count() > MAX_REVIEW_NAME_CHARS {
            return Err(ReviewError::NameTooLong);
        }
        let comment = self
            .comment
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());
        if comment.is_some_and(|c| c.chars().count() > MAX_REVIEW_COMMENT_CHARS) {
            return Err(ReviewError::CommentTooLong);
        }
        Ok(NewReview {
            product_id,
            customer_name: customer_name.to_owned(),
            rating: self.rating,
            comment: comment.map(str::to_owned),
        })
    }
}

// =============================================================================
// Store settings
// =============================================================================

/// A link to one of the store's social accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// Store-wide contact details and branding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub store_name: String,
    /// Number that receives WhatsApp orders.
    pub whatsapp_number: PhoneNumber,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phones: Vec<PhoneNumber>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            store_name: DEFAULT_STORE_NAME.to_owned(),
            whatsapp_number: PhoneNumber::from_trusted(DEFAULT_WHATSAPP_NUMBER),
            address: None,
            phones: Vec::new(),
            description: Some(DEFAULT_STORE_DESCRIPTION.to_owned()),
            social_links: Vec::new(),
        }
    }
}
