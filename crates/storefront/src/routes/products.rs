//! Product route handlers.
//!
//! Every request loads the catalog and runs the query engine in memory; the
//! catalog is small and never cached, so admin edits show up immediately.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use alqotari_core::query::{
    CategoryCount, SizeFacets, category_counts, related_products, size_facets,
};
use alqotari_core::whatsapp::{self, SizeChoice};
use alqotari_core::{
    Category, Product, ProductId, ProductQuery, RatingSummary, SizeTypeFilter, SortBy,
    filter_products,
};

use crate::db::{CategoryRepository, ProductRepository, ReviewRepository, SettingsRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// A product plus the values the shop front derives from it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub discount_percentage: Option<u32>,
    pub is_available: bool,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            discount_percentage: product.discount_percentage(),
            is_available: product.is_available(),
            product,
        }
    }
}

fn views(products: Vec<Product>) -> Vec<ProductView> {
    products.into_iter().map(ProductView::from).collect()
}

/// Listing query parameters, as sent by the shop front.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub size_type: Option<String>,
    pub size: Option<String>,
    pub length: Option<String>,
    pub width: Option<String>,
    pub sort: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<ProductListParams> for ProductQuery {
    fn from(params: ProductListParams) -> Self {
        Self {
            category: present(params.category),
            search: present(params.search),
            size_type: present(params.size_type).map(|t| {
                t.parse::<SizeTypeFilter>()
                    .unwrap_or(SizeTypeFilter::Unrecognized)
            }),
            size: present(params.size),
            length: present(params.length),
            width: present(params.width),
            sort: params
                .sort
                .map_or(SortBy::Default, |s| s.parse().unwrap_or_default()),
        }
    }
}

/// Filtered product listing with sidebar data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<ProductView>,
    pub total: usize,
    pub categories: Vec<CategoryCount>,
    pub facets: SizeFacets,
}

/// List products matching the query parameters.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> Result<Json<ProductListResponse>> {
    let query = ProductQuery::from(params);
    let catalog = ProductRepository::new(state.pool()).list().await?;
    let categories = CategoryRepository::new(state.pool()).list().await?;

    let selected = match query.size_type {
        Some(SizeTypeFilter::Only(size_type)) => Some(size_type),
        _ => None,
    };
    let facets = size_facets(&catalog, query.category.as_deref(), selected);
    let products = filter_products(&catalog, &query);

    tracing::debug!(
        category = ?query.category,
        sort = ?query.sort,
        matched = products.len(),
        "Product listing"
    );

    Ok(Json(ProductListResponse {
        total: products.len(),
        products: views(products),
        categories: category_counts(&catalog, &categories),
        facets,
    }))
}

/// Load a product customers are allowed to see.
async fn load_visible(state: &AppState, id: ProductId) -> Result<Product> {
    ProductRepository::new(state.pool())
        .get(id)
        .await?
        .filter(|p| p.is_visible)
        .ok_or_else(|| AppError::NotFound("Product".to_string()))
}

/// Product page data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailResponse {
    pub product: ProductView,
    pub category: Option<Category>,
    pub related: Vec<ProductView>,
    pub rating: RatingSummary,
    /// Ready-made order link; absent when a size must be chosen first.
    pub order_link: Option<String>,
}

/// Show a single visible product.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDetailResponse>> {
    let product = load_visible(&state, id).await?;
    let catalog = ProductRepository::new(state.pool()).list().await?;
    let category = CategoryRepository::new(state.pool())
        .get_by_slug(&product.category)
        .await?;
    let rating = ReviewRepository::new(state.pool())
        .rating_summary(id)
        .await?;
    let settings = SettingsRepository::new(state.pool()).get().await?;

    let order_link = whatsapp::order_link(
        &settings.whatsapp_number,
        &product,
        &SizeChoice::default(),
        &state.config().product_url(id),
    )
    .ok();

    Ok(Json(ProductDetailResponse {
        related: views(related_products(&catalog, &product)),
        product: product.into(),
        category,
        rating,
        order_link,
    }))
}

/// WhatsApp order link response.
#[derive(Debug, Serialize)]
pub struct OrderLinkResponse {
    pub url: String,
}

/// Build the WhatsApp order link for a product and size choice.
pub async fn order_link(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Query(choice): Query<SizeChoice>,
) -> Result<Json<OrderLinkResponse>> {
    let product = load_visible(&state, id).await?;
    let settings = SettingsRepository::new(state.pool()).get().await?;

    let url = whatsapp::order_link(
        &settings.whatsapp_number,
        &product,
        &choice,
        &state.config().product_url(id),
    )?;

    tracing::info!(product_id = %id, "Order link generated");
    Ok(Json(OrderLinkResponse { url }))
}
