//! WhatsApp order links.
//!
//! Customers order by opening a `wa.me` deep link with a pre-filled Arabic
//! message naming the product, its price, a link back to the product page and
//! the size they picked.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{PhoneNumber, SizeType};

const GREETING: &str = "مرحباً، أرغب في الاستفسار عن المنتج التالي:";
const CLOSING: &str = "أرجو التواصل معي لإتمام الطلب. شكراً لكم.";

/// The size a customer picked on the product page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SizeChoice {
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub length: Option<String>,
    #[serde(default)]
    pub width: Option<String>,
}

impl SizeChoice {
    fn size(&self) -> Option<&str> {
        self.size.as_deref().filter(|s| !s.is_empty())
    }

    fn length(&self) -> Option<&str> {
        self.length.as_deref().filter(|s| !s.is_empty())
    }

    fn width(&self) -> Option<&str> {
        self.width.as_deref().filter(|s| !s.is_empty())
    }
}

/// A size choice that is not enough to place an order.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeChoiceError {
    #[error("please choose a size")]
    MissingSize,
    #[error("please choose a length")]
    MissingLength,
    #[error("please choose a width")]
    MissingWidth,
}

/// Check that `choice` picks everything `product` asks for.
///
/// Products without a size scheme accept any choice.
///
/// # Errors
///
/// Returns the first missing dimension.
pub fn validate_size_choice(product: &Product, choice: &SizeChoice) -> Result<(), SizeChoiceError> {
    let Some(sizes) = product.sizes.as_ref().filter(|s| s.requires_choice()) else {
        return Ok(());
    };

    if sizes.size_type == SizeType::Thobe {
        if !sizes.available_lengths.is_empty() && choice.length().is_none() {
            return Err(SizeChoiceError::MissingLength);
        }
        if !sizes.available_widths.is_empty() && choice.width().is_none() {
            return Err(SizeChoiceError::MissingWidth);
        }
    } else if choice.size().is_none() {
        return Err(SizeChoiceError::MissingSize);
    }
    Ok(())
}

/// The size line of the order message, without its leading marker.
#[must_use]
pub fn size_text(product: &Product, choice: &SizeChoice) -> Option<String> {
    if !product.is_sized() {
        return None;
    }

    if product.size_type() == Some(SizeType::Thobe) {
        let mut parts = Vec::new();
        if let Some(length) = choice.length() {
            parts.push(format!("الطول: {length} انش"));
        }
        if let Some(width) = choice.width() {
            parts.push(format!("العرض: {width}"));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" - "))
        }
    } else {
        choice.size().map(|size| format!("المقاس: {size}"))
    }
}

/// Build the pre-filled order message.
#[must_use]
pub fn order_message(product: &Product, choice: &SizeChoice, product_url: &str) -> String {
    let mut message = format!(
        "{GREETING}\n\n📦 المنتج: {}\n💰 السعر: {}\n🔗 الرابط: {product_url}\n",
        product.name, product.price
    );
    if let Some(size) = size_text(product, choice) {
        message.push_str(&format!("📏 {size}\n"));
    }
    message.push('\n');
    message.push_str(CLOSING);
    message
}

/// A `wa.me` link that opens a chat with `phone` and `message` pre-filled.
#[must_use]
pub fn chat_link(phone: &PhoneNumber, message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        phone.digits(),
        urlencoding::encode(message)
    )
}

/// Validate the size choice and build the order link for a product.
///
/// # Errors
///
/// Returns [`SizeChoiceError`] when the product needs a size that was not picked.
pub fn order_link(
    phone: &PhoneNumber,
    product: &Product,
    choice: &SizeChoice,
    product_url: &str,
) -> Result<String, SizeChoiceError> {
    validate_size_choice(product, choice)?;
    Ok(chat_link(phone, &order_message(product, choice, product_url)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::tests::product;
    use crate::types::ProductSizes;

    const URL: &str = "https://alqotari.store/product/1";

    fn thobe() -> Product {
        let mut p = product("ثوب صيفي", "thobes", 250);
        p.sizes = Some(ProductSizes::default_for(SizeType::Thobe));
        p
    }

    fn shawl() -> Product {
        let mut p = product("شال كشمير", "shawls", 120);
        p.sizes = Some(ProductSizes::default_for(SizeType::Shawl));
        p
    }

    fn choice(size: Option<&str>, length: Option<&str>, width: Option<&str>) -> SizeChoice {
        SizeChoice {
            size: size.map(str::to_owned),
            length: length.map(str::to_owned),
            width: width.map(str::to_owned),
        }
    }

    #[test]
    fn test_unsized_product_needs_no_choice() {
        let p = product("عطر", "misc", 30);
        assert_eq!(validate_size_choice(&p, &SizeChoice::default()), Ok(()));
        assert_eq!(size_text(&p, &choice(Some("M"), None, None)), None);
    }

    #[test]
    fn test_shawl_requires_size() {
        let p = shawl();
        assert_eq!(
            validate_size_choice(&p, &SizeChoice::default()),
            Err(SizeChoiceError::MissingSize)
        );
        assert_eq!(
            validate_size_choice(&p, &choice(Some(""), None, None)),
            Err(SizeChoiceError::MissingSize)
        );
        assert_eq!(validate_size_choice(&p, &choice(Some("56"), None, None)), Ok(()));
    }

    #[test]
    fn test_thobe_requires_length_then_width() {
        let p = thobe();
        assert_eq!(
            validate_size_choice(&p, &choice(Some("M"), None, None)),
            Err(SizeChoiceError::MissingLength)
        );
        assert_eq!(
            validate_size_choice(&p, &choice(None, Some("52"), None)),
            Err(SizeChoiceError::MissingWidth)
        );
        assert_eq!(
            validate_size_choice(&p, &choice(None, Some("52"), Some("L"))),
            Ok(())
        );
    }

    #[test]
    fn test_thobe_without_widths_needs_length_only() {
        let mut p = thobe();
        if let Some(sizes) = p.sizes.as_mut() {
            sizes.available_widths.clear();
        }
        assert_eq!(validate_size_choice(&p, &choice(None, Some("50"), None)), Ok(()));
    }

    #[test]
    fn test_size_text() {
        assert_eq!(
            size_text(&thobe(), &choice(None, Some("52"), Some("L"))).unwrap(),
            "الطول: 52 انش - العرض: L"
        );
        assert_eq!(
            size_text(&shawl(), &choice(Some("56"), None, None)).unwrap(),
            "المقاس: 56"
        );
    }

    #[test]
    fn test_message_layout() {
        let message = order_message(&shawl(), &choice(Some("56"), None, None), URL);
        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(lines[0], GREETING);
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "📦 المنتج: شال كشمير");
        assert_eq!(lines[3], "💰 السعر: 120 ر.ي");
        assert_eq!(lines[4], format!("🔗 الرابط: {URL}"));
        assert_eq!(lines[5], "📏 المقاس: 56");
        assert_eq!(lines[6], "");
        assert_eq!(lines[7], CLOSING);
    }

    #[test]
    fn test_message_without_size_line() {
        let message = order_message(&product("عطر", "misc", 30), &SizeChoice::default(), URL);
        assert!(!message.contains("📏"));
        assert!(message.ends_with(&format!("{URL}\n\n{CLOSING}")));
    }

    #[test]
    fn test_link_strips_phone_formatting_and_encodes() {
        let phone = PhoneNumber::parse("+967 736-700-034").unwrap();
        let link = chat_link(&phone, "سلام عليكم\nشكرا & مع السلامة");
        assert!(link.starts_with("https://wa.me/967736700034?text="));
        let text = link.split_once("?text=").unwrap().1;
        assert!(!text.contains(' '));
        assert!(!text.contains('&'));
        assert!(text.contains("%0A"));
        assert_eq!(urlencoding::decode(text).unwrap(), "سلام عليكم\nشكرا & مع السلامة");
    }

    #[test]
    fn test_order_link_rejects_missing_size() {
        let phone = PhoneNumber::parse("+967736700034").unwrap();
        assert_eq!(
            order_link(&phone, &shawl(), &SizeChoice::default(), URL),
            Err(SizeChoiceError::MissingSize)
        );
        assert!(order_link(&phone, &shawl(), &choice(Some("52"), None, None), URL).is_ok());
    }
}
