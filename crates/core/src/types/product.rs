//! Product entity mirror.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product as served by the catalog endpoints.
///
/// Inventory and pricing here are a snapshot; the backend re-validates both
/// when an order is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Selling price in paise.
    pub price: Price,
    /// Pre-discount price in paise, when the product is on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<Price>,
    pub category: String,
    /// Remaining inventory count.
    #[serde(default)]
    pub inventory: i64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Product {
    /// Whether the product can currently be added to a cart.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.inventory > 0
    }

    /// First image, if any, for listing cards.
    #[must_use]
    pub fn featured_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Rounded percentage off versus the compare-at price, when on sale.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let compare_at = self.compare_at_price?;
        if compare_at.as_paise() <= self.price.as_paise() || compare_at.is_zero() {
            return None;
        }
        let off = compare_at.as_paise() - self.price.as_paise();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(((off * 100 + compare_at.as_paise() / 2) / compare_at.as_paise()) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: ProductId::new("p-1"),
            title: "Tough Chew Bone".to_string(),
            description: "A durable chew toy".to_string(),
            price: Price::from_paise(39900),
            compare_at_price: Some(Price::from_paise(49900)),
            category: "toys".to_string(),
            inventory: 3,
            images: vec!["https://cdn.example/bone.jpg".to_string()],
            tags: vec!["dog".to_string()],
        }
    }

    #[test]
    fn test_discount_percent() {
        assert_eq!(sample().discount_percent(), Some(20));
    }

    #[test]
    fn test_discount_percent_absent_without_markdown() {
        let mut product = sample();
        product.compare_at_price = None;
        assert_eq!(product.discount_percent(), None);
        product.compare_at_price = Some(Price::from_paise(100));
        assert_eq!(product.discount_percent(), None);
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = serde_json::to_value(sample()).expect("serialize");
        assert!(json.get("compareAtPrice").is_some());
        assert_eq!(json["price"], 39900);
    }
}
