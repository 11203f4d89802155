//! Contact phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneNumberError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains no digits at all.
    #[error("phone number must contain digits")]
    NoDigits,
}

/// A phone number as the store owner typed it (e.g. `+967 736 700 034`).
///
/// The original formatting is kept for display. [`PhoneNumber::digits`]
/// gives the form that messaging deep links expect.
///
/// ## Examples
///
/// ```
/// use alqotari_core::PhoneNumber;
///
/// let phone = PhoneNumber::parse("+967 736-700-034").unwrap();
/// assert_eq!(phone.digits(), "967736700034");
/// assert!(PhoneNumber::parse("call us").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse a phone number.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank or contains no digits.
    pub fn parse(s: &str) -> Result<Self, PhoneNumberError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PhoneNumberError::Empty);
        }
        if !trimmed.chars().any(|c| c.is_ascii_digit()) {
            return Err(PhoneNumberError::NoDigits);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Wrap a number known to contain digits, such as a built-in default.
    pub(crate) fn from_trusted(s: &str) -> Self {
        Self(s.to_owned())
    }

    /// Returns the number as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns only the ASCII digits of the number.
    #[must_use]
    pub fn digits(&self) -> String {
        self.0.chars().filter(char::is_ascii_digit).collect()
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PhoneNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        assert_eq!(PhoneNumber::parse("   "), Err(PhoneNumberError::Empty));
    }

    #[test]
    fn test_parse_no_digits() {
        assert_eq!(PhoneNumber::parse("n/a"), Err(PhoneNumberError::NoDigits));
    }

    #[test]
    fn test_keeps_original_formatting() {
        let phone = PhoneNumber::parse(" +967736700034 ").unwrap();
        assert_eq!(phone.as_str(), "+967736700034");
        assert_eq!(phone.to_string(), "+967736700034");
    }

    #[test]
    fn test_digits() {
        let phone = PhoneNumber::parse("(+967) 736 700 034").unwrap();
        assert_eq!(phone.digits(), "967736700034");
    }
}
