//! Size taxonomies for sized garments.
//!
//! Each product carries at most one size scheme. Shawls, kufis and underwear
//! offer a flat list of sizes; thobes are measured by length (inches) and
//! width (letter sizes) independently.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Shawl and ghutra sizes.
pub const SHAWL_SIZES: &[&str] = &["50", "52", "54", "56", "58", "60", "62"];

/// Thobe lengths, in inches.
pub const THOBE_LENGTH_SIZES: &[&str] = &[
    "42", "43", "44", "45", "46", "47", "48", "49", "50", "51", "52", "53", "54", "55", "56", "57",
    "58", "59", "60", "61", "62",
];

/// Thobe widths.
pub const THOBE_WIDTH_SIZES: &[&str] = &["S", "M", "L", "XL", "XXL"];

/// Kufi sizes.
pub const KUFI_SIZES: &[&str] = &["S", "M", "L", "XL", "XXL"];

/// Underwear sizes.
pub const UNDERWEAR_SIZES: &[&str] = &["S", "M", "L", "XL", "XXL", "3XL"];

/// Display order for letter sizes.
pub const LETTER_SIZE_ORDER: &[&str] = &["S", "M", "L", "XL", "XXL", "3XL"];

/// Errors that can occur when parsing a [`SizeType`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown size type: {0}")]
pub struct SizeTypeError(pub String);

/// The size scheme a product uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "catalog.size_type", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum SizeType {
    Shawl,
    Thobe,
    Kufi,
    Underwear,
    None,
}

impl SizeType {
    /// Every size type, in the order the admin form lists them.
    pub const ALL: [Self; 5] = [
        Self::Shawl,
        Self::Thobe,
        Self::Kufi,
        Self::Underwear,
        Self::None,
    ];

    /// Wire name of this size type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shawl => "shawl",
            Self::Thobe => "thobe",
            Self::Kufi => "kufi",
            Self::Underwear => "underwear",
            Self::None => "none",
        }
    }

    /// Customer-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Shawl => "شيلات / غتر",
            Self::Thobe => "أثواب",
            Self::Kufi => "كوافي",
            Self::Underwear => "ملابس داخلية",
            Self::None => "بدون مقاسات",
        }
    }

    /// Whether products of this type carry any sizes at all.
    #[must_use]
    pub const fn is_sized(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for SizeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeType {
    type Err = SizeTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SizeTypeError(s.to_owned()))
    }
}

/// A product's size descriptor.
///
/// `available_sizes` is used by every sized type except thobes, which use
/// `available_lengths` and `available_widths` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSizes {
    #[serde(rename = "type")]
    pub size_type: SizeType,
    #[serde(default)]
    pub available_sizes: Vec<String>,
    #[serde(default)]
    pub available_lengths: Vec<String>,
    #[serde(default)]
    pub available_widths: Vec<String>,
}

impl ProductSizes {
    /// The full default size range for a size type.
    #[must_use]
    pub fn default_for(size_type: SizeType) -> Self {
        let owned = |sizes: &[&str]| sizes.iter().map(|s| (*s).to_owned()).collect();
        let mut sizes = Self {
            size_type,
            available_sizes: Vec::new(),
            available_lengths: Vec::new(),
            available_widths: Vec::new(),
        };
        match size_type {
            SizeType::Shawl => sizes.available_sizes = owned(SHAWL_SIZES),
            SizeType::Thobe => {
                sizes.available_lengths = owned(THOBE_LENGTH_SIZES);
                sizes.available_widths = owned(THOBE_WIDTH_SIZES);
            }
            SizeType::Kufi => sizes.available_sizes = owned(KUFI_SIZES),
            SizeType::Underwear => sizes.available_sizes = owned(UNDERWEAR_SIZES),
            SizeType::None => {}
        }
        sizes
    }

    /// Whether a customer has to pick a size before ordering.
    #[must_use]
    pub fn requires_choice(&self) -> bool {
        self.size_type.is_sized()
            && (!self.available_sizes.is_empty() || !self.available_lengths.is_empty())
    }
}

/// Compare two size labels. Integer labels come first in numeric order,
/// followed by every other label in lexical order.
#[must_use]
pub fn compare_sizes(a: &str, b: &str) -> core::cmp::Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => core::cmp::Ordering::Less,
        (Err(_), Ok(_)) => core::cmp::Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Compare two letter sizes by [`LETTER_SIZE_ORDER`]; unknown labels sort last.
#[must_use]
pub fn compare_letter_sizes(a: &str, b: &str) -> core::cmp::Ordering {
    let rank = |s: &str| {
        LETTER_SIZE_ORDER
            .iter()
            .position(|o| *o == s)
            .unwrap_or(LETTER_SIZE_ORDER.len())
    };
    rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_type() {
        for t in SizeType::ALL {
            assert_eq!(t.as_str().parse::<SizeType>().unwrap(), t);
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "cape".parse::<SizeType>(),
            Err(SizeTypeError("cape".to_owned()))
        );
    }

    #[test]
    fn test_default_for_thobe_uses_lengths_and_widths() {
        let sizes = ProductSizes::default_for(SizeType::Thobe);
        assert!(sizes.available_sizes.is_empty());
        assert_eq!(sizes.available_lengths.len(), 21);
        assert_eq!(sizes.available_widths, vec!["S", "M", "L", "XL", "XXL"]);
    }

    #[test]
    fn test_default_for_none_is_empty() {
        let sizes = ProductSizes::default_for(SizeType::None);
        assert!(!sizes.requires_choice());
        assert!(sizes.available_sizes.is_empty());
    }

    #[test]
    fn test_requires_choice() {
        assert!(ProductSizes::default_for(SizeType::Shawl).requires_choice());
        assert!(ProductSizes::default_for(SizeType::Thobe).requires_choice());

        let mut empty_kufi = ProductSizes::default_for(SizeType::Kufi);
        empty_kufi.available_sizes.clear();
        assert!(!empty_kufi.requires_choice());
    }

    #[test]
    fn test_compare_sizes_numeric_before_lexical() {
        let mut sizes = vec!["60", "8", "52"];
        sizes.sort_by(|a, b| compare_sizes(a, b));
        assert_eq!(sizes, vec!["8", "52", "60"]);
    }

    #[test]
    fn test_compare_sizes_mixed_labels() {
        use core::cmp::Ordering;

        let mut sizes = vec!["2a", "10", "Free", "9", "10b"];
        sizes.sort_by(|a, b| compare_sizes(a, b));
        assert_eq!(sizes, vec!["9", "10", "10b", "2a", "Free"]);

        let labels = ["10", "2a", "9"];
        for a in labels {
            for b in labels {
                for c in labels {
                    if compare_sizes(a, b) == Ordering::Less
                        && compare_sizes(b, c) == Ordering::Less
                    {
                        assert_eq!(compare_sizes(a, c), Ordering::Less, "{a} {b} {c}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_compare_letter_sizes() {
        let mut sizes = vec!["XXL", "S", "3XL", "Custom", "M"];
        sizes.sort_by(|a, b| compare_letter_sizes(a, b));
        assert_eq!(sizes, vec!["S", "M", "XXL", "3XL", "Custom"]);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(ProductSizes::default_for(SizeType::Kufi)).unwrap();
        assert_eq!(json["type"], "kufi");
        assert_eq!(json["availableSizes"][0], "S");
    }
}
