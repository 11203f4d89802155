//! Product catalog query engine.
//!
//! Takes the full product list and a [`ProductQuery`] and returns the ordered
//! view shown to customers. Everything here is pure: no I/O, no state kept
//! between calls, and no failure modes. A malformed criterion (such as an
//! unknown size type) matches nothing instead of erroring.
//!
//! Filtering is a single conjunctive predicate pass followed by a stable sort,
//! so products with equal sort keys keep their catalog order.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Product};
use crate::collation::compare_names;
use crate::types::{SizeType, compare_letter_sizes, compare_sizes};

/// Maximum number of related products shown on a product page.
pub const RELATED_PRODUCTS_LIMIT: usize = 4;

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// Catalog order.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

impl FromStr for SortBy {
    type Err = std::convert::Infallible;

    /// Unrecognised values fall back to [`SortBy::Default`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            "name-asc" => Self::NameAsc,
            "name-desc" => Self::NameDesc,
            _ => Self::Default,
        })
    }
}

/// A size-type criterion.
///
/// Kept separate from [`SizeType`] so that a value the catalog does not know
/// can still be carried through and simply match nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeTypeFilter {
    Only(SizeType),
    Unrecognized,
}

impl From<SizeType> for SizeTypeFilter {
    fn from(size_type: SizeType) -> Self {
        Self::Only(size_type)
    }
}

impl FromStr for SizeTypeFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<SizeType>()
            .map_or(Self::Unrecognized, Self::Only))
    }
}

/// Filter and sort criteria for the product listing.
///
/// `None` means "no constraint". Empty strings are treated the same as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductQuery {
    /// Keep products in this category slug.
    pub category: Option<String>,
    /// Keep products whose name or description contains this text.
    pub search: Option<String>,
    /// Keep products with this size scheme.
    pub size_type: Option<SizeTypeFilter>,
    /// Keep products offering this size. Ignored when `size_type` is thobe.
    pub size: Option<String>,
    /// Keep thobes offering this length. Only used when `size_type` is thobe.
    pub length: Option<String>,
    /// Keep thobes offering this width. Only used when `size_type` is thobe.
    pub width: Option<String>,
    pub sort: SortBy,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

impl ProductQuery {
    /// Whether this query selects thobes, switching on length/width matching.
    #[must_use]
    pub fn is_thobe(&self) -> bool {
        self.size_type == Some(SizeTypeFilter::Only(SizeType::Thobe))
    }

    fn effective_size(&self) -> Option<&str> {
        if self.is_thobe() {
            None
        } else {
            non_empty(self.size.as_ref())
        }
    }

    fn effective_length(&self) -> Option<&str> {
        if self.is_thobe() {
            non_empty(self.length.as_ref())
        } else {
            None
        }
    }

    fn effective_width(&self) -> Option<&str> {
        if self.is_thobe() {
            non_empty(self.width.as_ref())
        } else {
            None
        }
    }

    /// Whether any size criterion actually constrains the result.
    #[must_use]
    pub fn has_size_constraint(&self) -> bool {
        self.size_type.is_some()
            || self.effective_size().is_some()
            || self.effective_length().is_some()
            || self.effective_width().is_some()
    }

    /// Whether a single product satisfies every criterion.
    ///
    /// Hidden products never match.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if !product.is_visible {
            return false;
        }

        if non_empty(self.category.as_ref()).is_some_and(|c| product.category != c) {
            return false;
        }

        if non_empty(self.search.as_ref())
            .is_some_and(|text| !product.name.contains(text) && !product.description.contains(text))
        {
            return false;
        }

        self.matches_sizes(product)
    }

    fn matches_sizes(&self, product: &Product) -> bool {
        if !self.has_size_constraint() {
            return true;
        }

        let Some(sizes) = product.sizes.as_ref().filter(|s| s.size_type.is_sized()) else {
            return false;
        };

        match self.size_type {
            Some(SizeTypeFilter::Only(wanted)) if wanted != sizes.size_type => return false,
            Some(SizeTypeFilter::Unrecognized) => return false,
            _ => {}
        }

        let offers = |list: &[String], value: Option<&str>| {
            value.is_none_or(|v| list.iter().any(|s| s == v))
        };

        // Thobes carry no flat sizes; a plain size never excludes them.
        let size = if sizes.size_type == SizeType::Thobe {
            None
        } else {
            self.effective_size()
        };

        offers(&sizes.available_sizes, size)
            && offers(&sizes.available_lengths, self.effective_length())
            && offers(&sizes.available_widths, self.effective_width())
    }
}

/// Apply a query to the catalog, returning the ordered customer-facing view.
#[must_use]
pub fn filter_products(products: &[Product], query: &ProductQuery) -> Vec<Product> {
    let mut result: Vec<Product> = products
        .iter()
        .filter(|p| query.matches(p))
        .cloned()
        .collect();

    match query.sort {
        SortBy::Default => {}
        SortBy::PriceAsc => result.sort_by(|a, b| a.price.cmp(&b.price)),
        SortBy::PriceDesc => result.sort_by(|a, b| b.price.cmp(&a.price)),
        SortBy::NameAsc => result.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortBy::NameDesc => result.sort_by(|a, b| compare_names(&b.name, &a.name)),
    }

    result
}

/// Visible products flagged as featured, in catalog order.
#[must_use]
pub fn featured_products(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.is_visible && p.featured)
        .cloned()
        .collect()
}

/// Up to [`RELATED_PRODUCTS_LIMIT`] other visible products from the same category.
#[must_use]
pub fn related_products(products: &[Product], product: &Product) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.is_visible && p.id != product.id && p.category == product.category)
        .take(RELATED_PRODUCTS_LIMIT)
        .cloned()
        .collect()
}

/// A category with the number of visible products in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    #[serde(flatten)]
    pub category: Category,
    pub product_count: usize,
}

/// Count visible products per category, keeping category order.
#[must_use]
pub fn category_counts(products: &[Product], categories: &[Category]) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for product in products.iter().filter(|p| p.is_visible) {
        *counts.entry(product.category.as_str()).or_insert(0) += 1;
    }

    categories
        .iter()
        .map(|category| CategoryCount {
            product_count: counts.get(category.slug.as_str()).copied().unwrap_or(0),
            category: category.clone(),
        })
        .collect()
}

/// Size options to offer in the filter sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeFacets {
    /// Size schemes present among the products, excluding `none`.
    pub size_types: Vec<SizeType>,
    /// Sizes offered for the selected non-thobe scheme.
    pub sizes: Vec<String>,
    /// Lengths offered when thobes are selected.
    pub lengths: Vec<String>,
    /// Widths offered when thobes are selected.
    pub widths: Vec<String>,
}

fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for v in values {
        if !out.contains(v) {
            out.push(v.clone());
        }
    }
    out
}

/// Compute the size options for the visible products of `category`.
///
/// `selected` narrows the size, length and width lists to one scheme; with no
/// scheme selected only `size_types` is filled in.
#[must_use]
pub fn size_facets(
    products: &[Product],
    category: Option<&str>,
    selected: Option<SizeType>,
) -> SizeFacets {
    let pool: Vec<&Product> = products
        .iter()
        .filter(|p| p.is_visible)
        .filter(|p| category.is_none_or(|c| c.is_empty() || p.category == c))
        .collect();

    let mut facets = SizeFacets::default();
    for size_type in pool.iter().filter_map(|p| p.size_type()) {
        if size_type.is_sized() && !facets.size_types.contains(&size_type) {
            facets.size_types.push(size_type);
        }
    }

    let Some(selected) = selected.filter(|t| t.is_sized()) else {
        return facets;
    };
    let of_type: Vec<_> = pool
        .iter()
        .filter_map(|p| p.sizes.as_ref())
        .filter(|s| s.size_type == selected)
        .collect();

    if selected == SizeType::Thobe {
        facets.lengths = distinct(of_type.iter().flat_map(|s| s.available_lengths.iter()));
        facets.lengths.sort_by(|a, b| compare_sizes(a, b));
        facets.widths = distinct(of_type.iter().flat_map(|s| s.available_widths.iter()));
        facets.widths.sort_by(|a, b| compare_letter_sizes(a, b));
    } else {
        facets.sizes = distinct(of_type.iter().flat_map(|s| s.available_sizes.iter()));
        facets.sizes.sort_by(|a, b| compare_sizes(a, b));
    }
    facets
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::catalog::tests::product;
    use crate::types::{CategoryId, Price, ProductSizes};
    use rust_decimal::Decimal;

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    fn thobe(name: &str, lengths: &[&str], widths: &[&str]) -> Product {
        let mut p = product(name, "thobes", 300);
        p.sizes = Some(ProductSizes {
            size_type: SizeType::Thobe,
            available_sizes: Vec::new(),
            available_lengths: lengths.iter().map(|s| (*s).to_owned()).collect(),
            available_widths: widths.iter().map(|s| (*s).to_owned()).collect(),
        });
        p
    }

    fn sized(name: &str, size_type: SizeType, sizes: &[&str]) -> Product {
        let mut p = product(name, "sized", 100);
        p.sizes = Some(ProductSizes {
            size_type,
            available_sizes: sizes.iter().map(|s| (*s).to_owned()).collect(),
            available_lengths: Vec::new(),
            available_widths: Vec::new(),
        });
        p
    }

    fn abc() -> Vec<Product> {
        vec![
            product("A", "x", 100),
            product("B", "x", 50),
            product("C", "y", 75),
        ]
    }

    fn category(slug: &str) -> Category {
        Category {
            id: CategoryId::generate(),
            name: slug.to_uppercase(),
            slug: slug.to_owned(),
            image: String::new(),
            description: None,
        }
    }

    // -------------------------------------------------------------------------
    // Listing scenarios
    // -------------------------------------------------------------------------

    #[test]
    fn test_category_with_price_ascending() {
        let query = ProductQuery {
            category: Some("x".to_owned()),
            sort: SortBy::PriceAsc,
            ..ProductQuery::default()
        };
        assert_eq!(names(&filter_products(&abc(), &query)), vec!["B", "A"]);
    }

    #[test]
    fn test_search_without_match_is_empty() {
        let query = ProductQuery {
            search: Some("zzz".to_owned()),
            ..ProductQuery::default()
        };
        assert!(filter_products(&abc(), &query).is_empty());
    }

    #[test]
    fn test_thobe_length_filter() {
        let products = vec![thobe("D", &["50", "52"], &["M"])];
        let mut query = ProductQuery {
            size_type: Some(SizeType::Thobe.into()),
            length: Some("52".to_owned()),
            ..ProductQuery::default()
        };
        assert_eq!(names(&filter_products(&products, &query)), vec!["D"]);

        query.length = Some("99".to_owned());
        assert!(filter_products(&products, &query).is_empty());
    }

    #[test]
    fn test_hidden_product_excluded_despite_category_match() {
        let mut hidden = product("E", "x", 10);
        hidden.is_visible = false;
        let mut products = abc();
        products.push(hidden);

        let query = ProductQuery {
            category: Some("x".to_owned()),
            ..ProductQuery::default()
        };
        assert_eq!(names(&filter_products(&products, &query)), vec!["A", "B"]);
    }

    #[test]
    fn test_empty_query_returns_visible_in_catalog_order() {
        let mut products = abc();
        products[1].is_visible = false;
        assert_eq!(
            names(&filter_products(&products, &ProductQuery::default())),
            vec!["A", "C"]
        );
    }

    // -------------------------------------------------------------------------
    // Criteria details
    // -------------------------------------------------------------------------

    #[test]
    fn test_empty_strings_are_no_constraint() {
        let query = ProductQuery {
            category: Some(String::new()),
            search: Some(String::new()),
            size: Some(String::new()),
            ..ProductQuery::default()
        };
        assert_eq!(filter_products(&abc(), &query).len(), 3);
    }

    #[test]
    fn test_search_matches_description() {
        let query = ProductQuery {
            search: Some("وصف C".to_owned()),
            ..ProductQuery::default()
        };
        assert_eq!(names(&filter_products(&abc(), &query)), vec!["C"]);
    }

    #[test]
    fn test_search_is_case_sensitive() {
        let query = ProductQuery {
            search: Some("a".to_owned()),
            ..ProductQuery::default()
        };
        assert!(filter_products(&abc(), &query).is_empty());
    }

    #[test]
    fn test_thobe_ignores_plain_size() {
        let products = vec![thobe("D", &["50"], &["M"])];
        let query = ProductQuery {
            size_type: Some(SizeType::Thobe.into()),
            size: Some("nonexistent".to_owned()),
            ..ProductQuery::default()
        };
        assert_eq!(names(&filter_products(&products, &query)), vec!["D"]);
    }

    #[test]
    fn test_length_and_width_both_required_when_given() {
        let products = vec![
            thobe("both", &["52"], &["M"]),
            thobe("length-only", &["52"], &["S"]),
        ];
        let query = ProductQuery {
            size_type: Some(SizeType::Thobe.into()),
            length: Some("52".to_owned()),
            width: Some("M".to_owned()),
            ..ProductQuery::default()
        };
        assert_eq!(names(&filter_products(&products, &query)), vec!["both"]);
    }

    #[test]
    fn test_length_ignored_without_thobe_type() {
        let products = abc();
        let query = ProductQuery {
            length: Some("52".to_owned()),
            width: Some("M".to_owned()),
            ..ProductQuery::default()
        };
        assert_eq!(filter_products(&products, &query).len(), 3);
    }

    #[test]
    fn test_size_without_type_excludes_unsized() {
        let products = vec![
            product("plain", "x", 10),
            sized("kufi", SizeType::Kufi, &["M", "L"]),
            sized("underwear", SizeType::Underwear, &["S"]),
        ];
        let query = ProductQuery {
            size: Some("M".to_owned()),
            ..ProductQuery::default()
        };
        assert_eq!(names(&filter_products(&products, &query)), vec!["kufi"]);
    }

    #[test]
    fn test_size_without_type_keeps_thobes() {
        let products = vec![
            thobe("ثوب", &["52"], &["M"]),
            sized("كوفية", SizeType::Kufi, &["M"]),
            sized("فانلة", SizeType::Underwear, &["XL"]),
        ];
        let query = ProductQuery {
            size: Some("M".to_owned()),
            ..ProductQuery::default()
        };
        assert_eq!(names(&filter_products(&products, &query)), vec!["ثوب", "كوفية"]);

        let kufi_only = ProductQuery {
            size_type: Some(SizeTypeFilter::Only(SizeType::Kufi)),
            ..query
        };
        assert_eq!(names(&filter_products(&products, &kufi_only)), vec!["كوفية"]);
    }

    #[test]
    fn test_none_tagged_products_excluded_by_size_filter() {
        let mut stray = sized("stray", SizeType::None, &["M"]);
        stray.category = "x".to_owned();
        let products = vec![stray];

        let by_size = ProductQuery {
            size: Some("M".to_owned()),
            ..ProductQuery::default()
        };
        assert!(filter_products(&products, &by_size).is_empty());

        let by_type = ProductQuery {
            size_type: Some(SizeType::None.into()),
            ..ProductQuery::default()
        };
        assert!(filter_products(&products, &by_type).is_empty());

        assert_eq!(filter_products(&products, &ProductQuery::default()).len(), 1);
    }

    #[test]
    fn test_unrecognized_size_type_matches_nothing() {
        let products = vec![sized("kufi", SizeType::Kufi, &["M"])];
        let query = ProductQuery {
            size_type: Some("cape".parse().unwrap()),
            ..ProductQuery::default()
        };
        assert!(filter_products(&products, &query).is_empty());
    }

    #[test]
    fn test_size_type_without_matches_is_empty() {
        let products = vec![sized("kufi", SizeType::Kufi, &["M"])];
        let query = ProductQuery {
            size_type: Some(SizeType::Shawl.into()),
            ..ProductQuery::default()
        };
        assert!(filter_products(&products, &query).is_empty());
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    #[test]
    fn test_price_descending() {
        let query = ProductQuery {
            sort: SortBy::PriceDesc,
            ..ProductQuery::default()
        };
        assert_eq!(names(&filter_products(&abc(), &query)), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_price_sort_is_stable() {
        let mut products = abc();
        products[2].price = Price::new(Decimal::from(50)).unwrap();
        let query = ProductQuery {
            sort: SortBy::PriceAsc,
            ..ProductQuery::default()
        };
        assert_eq!(names(&filter_products(&products, &query)), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_name_sort_uses_arabic_collation() {
        let products = vec![
            product("بشت", "x", 1),
            product("أحمر", "x", 1),
            product("ابيض", "x", 1),
        ];
        let asc = ProductQuery {
            sort: SortBy::NameAsc,
            ..ProductQuery::default()
        };
        assert_eq!(
            names(&filter_products(&products, &asc)),
            vec!["ابيض", "أحمر", "بشت"]
        );

        let desc = ProductQuery {
            sort: SortBy::NameDesc,
            ..ProductQuery::default()
        };
        assert_eq!(
            names(&filter_products(&products, &desc)),
            vec!["بشت", "أحمر", "ابيض"]
        );
    }

    #[test]
    fn test_sort_parse_falls_back_to_default() {
        assert_eq!("price-asc".parse::<SortBy>().unwrap(), SortBy::PriceAsc);
        assert_eq!("cheapest".parse::<SortBy>().unwrap(), SortBy::Default);
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    fn mixed_catalog() -> Vec<Product> {
        let mut products = abc();
        products.push(thobe("ثوب", &["50", "52"], &["M", "L"]));
        products.push(sized("كوفية", SizeType::Kufi, &["M"]));
        let mut hidden = sized("مخفي", SizeType::Kufi, &["M"]);
        hidden.is_visible = false;
        products.push(hidden);
        products
    }

    fn sample_queries() -> Vec<ProductQuery> {
        vec![
            ProductQuery::default(),
            ProductQuery {
                category: Some("x".to_owned()),
                ..ProductQuery::default()
            },
            ProductQuery {
                size_type: Some(SizeType::Kufi.into()),
                size: Some("M".to_owned()),
                sort: SortBy::NameAsc,
                ..ProductQuery::default()
            },
            ProductQuery {
                size_type: Some(SizeType::Thobe.into()),
                width: Some("L".to_owned()),
                sort: SortBy::PriceDesc,
                ..ProductQuery::default()
            },
            ProductQuery {
                search: Some("وصف".to_owned()),
                sort: SortBy::PriceAsc,
                ..ProductQuery::default()
            },
        ]
    }

    #[test]
    fn test_result_is_visible_subset_and_idempotent() {
        let products = mixed_catalog();
        for query in sample_queries() {
            let first = filter_products(&products, &query);
            assert!(first.iter().all(|p| products.contains(p)));
            assert!(first.iter().all(|p| p.is_visible));
            assert_eq!(first, filter_products(&products, &query));
        }
    }

    #[test]
    fn test_adding_constraints_never_grows_result() {
        let products = mixed_catalog();
        let broad = ProductQuery::default();
        let narrower = ProductQuery {
            size_type: Some(SizeType::Kufi.into()),
            ..ProductQuery::default()
        };
        let narrowest = ProductQuery {
            size_type: Some(SizeType::Kufi.into()),
            size: Some("M".to_owned()),
            search: Some("كوفية".to_owned()),
            ..ProductQuery::default()
        };
        let sizes: Vec<usize> = [broad, narrower, narrowest]
            .iter()
            .map(|q| filter_products(&products, q).len())
            .collect();
        assert!(sizes.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_price_order_is_monotonic() {
        let products = mixed_catalog();
        let query = ProductQuery {
            sort: SortBy::PriceAsc,
            ..ProductQuery::default()
        };
        let result = filter_products(&products, &query);
        assert!(result.windows(2).all(|w| w[0].price <= w[1].price));
    }

    // -------------------------------------------------------------------------
    // Derived views
    // -------------------------------------------------------------------------

    #[test]
    fn test_category_counts_respect_visibility() {
        let mut products = abc();
        products[0].is_visible = false;
        let counts = category_counts(&products, &[category("x"), category("y"), category("z")]);
        let by_slug: Vec<(&str, usize)> = counts
            .iter()
            .map(|c| (c.category.slug.as_str(), c.product_count))
            .collect();
        assert_eq!(by_slug, vec![("x", 1), ("y", 1), ("z", 0)]);
    }

    #[test]
    fn test_featured_products() {
        let mut products = abc();
        products[0].featured = true;
        products[2].featured = true;
        products[2].is_visible = false;
        assert_eq!(names(&featured_products(&products)), vec!["A"]);
    }

    #[test]
    fn test_related_products() {
        let mut products: Vec<Product> = (0..6).map(|i| product(&format!("p{i}"), "x", 1)).collect();
        products.push(product("other", "y", 1));
        products[1].is_visible = false;
        let related = related_products(&products, &products[0]);
        assert_eq!(names(&related), vec!["p2", "p3", "p4", "p5"]);
    }

    #[test]
    fn test_size_facets_types_only_without_selection() {
        let products = mixed_catalog();
        let facets = size_facets(&products, None, None);
        assert_eq!(facets.size_types, vec![SizeType::Thobe, SizeType::Kufi]);
        assert!(facets.sizes.is_empty());
        assert!(facets.lengths.is_empty());
    }

    #[test]
    fn test_size_facets_sorting() {
        let products = vec![
            sized("a", SizeType::Shawl, &["60", "52"]),
            sized("b", SizeType::Shawl, &["56", "52"]),
            thobe("c", &["58", "44"], &["XL", "S"]),
            thobe("d", &["50"], &["3XL", "M"]),
        ];
        let shawls = size_facets(&products, None, Some(SizeType::Shawl));
        assert_eq!(shawls.sizes, vec!["52", "56", "60"]);

        let thobes = size_facets(&products, None, Some(SizeType::Thobe));
        assert_eq!(thobes.lengths, vec!["44", "50", "58"]);
        assert_eq!(thobes.widths, vec!["S", "M", "XL", "3XL"]);
        assert!(thobes.sizes.is_empty());
    }

    #[test]
    fn test_size_facets_limited_to_category() {
        let products = vec![
            sized("a", SizeType::Shawl, &["52"]),
            thobe("c", &["58"], &["S"]),
        ];
        let facets = size_facets(&products, Some("thobes"), None);
        assert_eq!(facets.size_types, vec![SizeType::Thobe]);
    }
}
