//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are currency-agnostic amounts. The store trades in Yemeni rial and
//! displays amounts with the [`CURRENCY_LABEL`] suffix.

use core::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Suffix shown after every amount in customer-facing text.
pub const CURRENCY_LABEL: &str = "ر.ي";

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative amount.
///
/// ## Examples
///
/// ```
/// use alqotari_core::Price;
/// use rust_decimal::Decimal;
///
/// let price = Price::new(Decimal::new(15000, 0)).unwrap();
/// assert_eq!(price.to_string(), "15000 ر.ي");
///
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whole-percent discount of this price relative to `original`.
    ///
    /// Returns `None` unless `original` is strictly greater than `self`.
    /// Halves round up, so 12.5% shows as 13%.
    #[must_use]
    pub fn discount_percentage_from(&self, original: Self) -> Option<u32> {
        if original.0 <= self.0 || original.0.is_zero() {
            return None;
        }
        let ratio = (original.0 - self.0) / original.0 * Decimal::ONE_HUNDRED;
        ratio
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {CURRENCY_LABEL}", self.0.normalize())
    }
}
