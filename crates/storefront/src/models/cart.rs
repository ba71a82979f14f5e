//! Session-backed shopping cart.
//!
//! The cart lives entirely in the shopper's session as a single JSON
//! value. The backend only learns about it at order creation, so every
//! total computed here is a display estimate; the backend recomputes
//! authoritative amounts when the order is placed.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use pawcart_core::{Address, Discount, Price, ProductId, TaxConfig};

use super::session_keys;

/// A single line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub title: String,
    pub unit_price: Price,
    pub quantity: u32,
    pub image: Option<String>,
}

impl CartItem {
    /// Line total for this item.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// The shopper's cart, stored in the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
    /// Discount code the shopper applied, if any. Validated against the
    /// live discount list on every render, so an expired code silently
    /// stops contributing.
    pub discount_code: Option<String>,
    /// Shipping address captured at checkout. Survives `clear` so a
    /// repeat purchase can reuse it.
    pub shipping_address: Option<Address>,
}

impl Cart {
    /// Load the cart from the session, or an empty cart if none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn load(session: &Session) -> Result<Self, tower_sessions::session::Error> {
        Ok(session
            .get::<Self>(session_keys::CART)
            .await?
            .unwrap_or_default())
    }

    /// Persist the cart back to the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn save(&self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        session.insert(session_keys::CART, self).await
    }

    /// Add `quantity` units of a product, merging with an existing line
    /// for the same product.
    pub fn add(&mut self, item: CartItem) {
        if item.quantity == 0 {
            return;
        }
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == item.product_id)
        {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            self.items.push(item);
        }
    }

    /// Set the quantity for a product line. A quantity of zero removes
    /// the line.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| &i.product_id == product_id) {
            item.quantity = quantity;
        }
    }

    /// Remove a product line entirely.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.items.retain(|i| &i.product_id != product_id);
    }

    /// Empty the cart after a successful order. The shipping address is
    /// kept; the discount code is not.
    pub fn clear(&mut self) {
        self.items.clear();
        self.discount_code = None;
    }

    /// Sum of all line totals before discount and tax.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items
            .iter()
            .fold(Price::ZERO, |acc, i| acc.saturating_add(i.line_total()))
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Compute display totals for the current cart contents.
    ///
    /// `discount` should already be filtered to a live discount matching
    /// the applied code. Tax is only added when the active tax config is
    /// exclusive; inclusive tax is assumed to be inside the listed
    /// prices.
    #[must_use]
    pub fn totals(&self, discount: Option<&Discount>, tax: Option<&TaxConfig>) -> CartTotals {
        let subtotal = self.subtotal();
        let discount_amount = discount.map_or(Price::ZERO, |d| d.amount_off(subtotal));
        let taxable = subtotal.saturating_sub(discount_amount);
        let tax_amount = tax.map_or(Price::ZERO, |t| t.tax_on(taxable));
        let total = taxable.saturating_add(tax_amount);

        CartTotals {
            subtotal,
            discount: discount_amount,
            tax: tax_amount,
            tax_label: tax.filter(|t| t.active).map(|t| t.name.clone()),
            tax_inclusive: tax.is_some_and(|t| t.active && t.inclusive),
            total,
        }
    }
}

/// Display totals derived from the cart.
#[derive(Debug, Clone, Serialize)]
pub struct CartTotals {
    pub subtotal: Price,
    pub discount: Price,
    pub tax: Price,
    /// Name of the active tax, e.g. "GST", when one is configured.
    pub tax_label: Option<String>,
    /// True when tax is already included in listed prices.
    pub tax_inclusive: bool,
    pub total: Price,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pawcart_core::DiscountType;

    fn item(id: &str, paise: i64, qty: u32) -> CartItem {
        CartItem {
            product_id: ProductId::new(id),
            title: format!("Product {id}"),
            unit_price: Price::from_paise(paise),
            quantity: qty,
            image: None,
        }
    }

    fn percent_discount(percent: i64, cap: Option<i64>) -> Discount {
        Discount {
            id: pawcart_core::DiscountId::new("d-1"),
            code: "SAVE10".to_string(),
            discount_type: DiscountType::Percentage,
            value: percent,
            starts_at: None,
            ends_at: None,
            usage_limit: None,
            usage_count: 0,
            min_order_value: None,
            max_discount_amount: cap.map(Price::from_paise),
            first_time_only: false,
            active: true,
        }
    }

    #[test]
    fn test_add_merges_same_product() {
        let mut cart = Cart::default();
        cart.add(item("p-1", 10000, 1));
        cart.add(item("p-1", 10000, 2));
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
    }

    #[test]
    fn test_add_zero_quantity_is_noop() {
        let mut cart = Cart::default();
        cart.add(item("p-1", 10000, 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::default();
        cart.add(item("p-1", 10000, 2));
        cart.set_quantity(&ProductId::new("p-1"), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_leaves_other_lines() {
        let mut cart = Cart::default();
        cart.add(item("p-1", 10000, 1));
        cart.add(item("p-2", 5000, 1));
        cart.remove(&ProductId::new("p-1"));
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].product_id.as_str(), "p-2");
    }

    #[test]
    fn test_clear_keeps_address() {
        let mut cart = Cart::default();
        cart.add(item("p-1", 10000, 1));
        cart.discount_code = Some("SAVE10".to_string());
        cart.shipping_address = Some(Address {
            name: "A Shopper".to_string(),
            phone: "9999999999".to_string(),
            line1: "1 Bark Lane".to_string(),
            line2: None,
            city: "Pune".to_string(),
            state: "MH".to_string(),
            pincode: "411001".to_string(),
        });
        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.discount_code.is_none());
        assert!(cart.shipping_address.is_some());
    }

    #[test]
    fn test_subtotal_and_count() {
        let mut cart = Cart::default();
        cart.add(item("p-1", 10000, 2));
        cart.add(item("p-2", 2550, 3));
        assert_eq!(cart.subtotal(), Price::from_paise(27650));
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_totals_with_capped_percent_discount() {
        let mut cart = Cart::default();
        cart.add(item("p-1", 500_000, 1));
        let discount = percent_discount(10, Some(20_000));
        let totals = cart.totals(Some(&discount), None);
        assert_eq!(totals.discount, Price::from_paise(20_000));
        assert_eq!(totals.total, Price::from_paise(480_000));
    }

    #[test]
    fn test_totals_exclusive_tax_added() {
        let mut cart = Cart::default();
        cart.add(item("p-1", 10000, 1));
        let tax = TaxConfig {
            name: "GST".to_string(),
            rate: 18.0,
            inclusive: false,
            active: true,
        };
        let totals = cart.totals(None, Some(&tax));
        assert_eq!(totals.tax, Price::from_paise(1800));
        assert_eq!(totals.total, Price::from_paise(11800));
        assert!(!totals.tax_inclusive);
    }

    #[test]
    fn test_totals_inclusive_tax_not_added() {
        let mut cart = Cart::default();
        cart.add(item("p-1", 10000, 1));
        let tax = TaxConfig {
            name: "GST".to_string(),
            rate: 18.0,
            inclusive: true,
            active: true,
        };
        let totals = cart.totals(None, Some(&tax));
        assert_eq!(totals.tax, Price::ZERO);
        assert_eq!(totals.total, Price::from_paise(10000));
        assert!(totals.tax_inclusive);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut cart = Cart::default();
        cart.add(item("p-1", 10000, 2));
        cart.discount_code = Some("SAVE10".to_string());
        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back.items.len(), 1);
        assert_eq!(back.items[0].quantity, 2);
        assert_eq!(back.discount_code.as_deref(), Some("SAVE10"));
    }
}
