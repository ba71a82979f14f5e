//! Discount code entity mirror.
//!
//! Redemption is validated server-side at checkout; the client only uses these
//! fields for display and for a non-authoritative savings estimate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DiscountId, DiscountType, Price};

/// A discount code as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub id: DiscountId,
    pub code: String,
    #[serde(rename = "type")]
    pub discount_type: DiscountType,
    /// Percentage points for percentage discounts, paise for fixed discounts.
    pub value: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    #[serde(default)]
    pub usage_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_order_value: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_discount_amount: Option<Price>,
    #[serde(default)]
    pub first_time_only: bool,
    #[serde(default)]
    pub active: bool,
}

impl Discount {
    /// Whether the validity window contains `now`.
    ///
    /// Purely time-based; the `active` flag is a separate admin switch and an
    /// expired code is not live no matter what the flag says.
    #[must_use]
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        if let Some(starts_at) = self.starts_at {
            if now < starts_at {
                return false;
            }
        }
        if let Some(ends_at) = self.ends_at {
            if now > ends_at {
                return false;
            }
        }
        true
    }

    /// Display-only estimate of the amount this code takes off a subtotal.
    ///
    /// Zero when the subtotal is below the minimum order value. Percentage
    /// discounts are capped by `max_discount_amount`; fixed discounts never
    /// exceed the subtotal. The backend recomputes the real amount at
    /// checkout.
    #[must_use]
    pub fn amount_off(&self, subtotal: Price) -> Price {
        if let Some(min) = self.min_order_value {
            if subtotal < min {
                return Price::ZERO;
            }
        }
        match self.discount_type {
            DiscountType::Percentage => {
                #[allow(clippy::cast_precision_loss)]
                let off = subtotal.percent_of(self.value as f64);
                match self.max_discount_amount {
                    Some(cap) => off.min(cap),
                    None => off,
                }
            }
            DiscountType::Fixed => Price::from_paise(self.value).min(subtotal),
        }
    }

    /// Short description for listings, e.g. "10% off" or "₹50.00 off".
    #[must_use]
    pub fn describe(&self) -> String {
        match self.discount_type {
            DiscountType::Percentage => format!("{}% off", self.value),
            DiscountType::Fixed => format!("{} off", Price::from_paise(self.value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn percentage_discount() -> Discount {
        Discount {
            id: DiscountId::new("d-1"),
            code: "PAW10".to_string(),
            discount_type: DiscountType::Percentage,
            value: 10,
            starts_at: None,
            ends_at: None,
            usage_limit: Some(100),
            usage_count: 4,
            min_order_value: Some(Price::from_paise(50000)),
            max_discount_amount: Some(Price::from_paise(20000)),
            first_time_only: false,
            active: true,
        }
    }

    #[test]
    fn test_expired_is_not_live_even_when_active() {
        let mut discount = percentage_discount();
        discount.active = true;
        discount.ends_at = Some(Utc::now() - Duration::hours(1));
        assert!(!discount.is_live(Utc::now()));
    }

    #[test]
    fn test_future_start_is_not_live() {
        let mut discount = percentage_discount();
        discount.starts_at = Some(Utc::now() + Duration::hours(1));
        assert!(!discount.is_live(Utc::now()));
    }

    #[test]
    fn test_open_window_is_live() {
        assert!(percentage_discount().is_live(Utc::now()));
    }

    #[test]
    fn test_amount_off_below_minimum_is_zero() {
        let discount = percentage_discount();
        assert_eq!(discount.amount_off(Price::from_paise(49999)), Price::ZERO);
    }

    #[test]
    fn test_percentage_capped_by_max_amount() {
        let discount = percentage_discount();
        // 10% of 500000 paise is 50000, above the 20000 cap
        assert_eq!(
            discount.amount_off(Price::from_paise(500_000)),
            Price::from_paise(20000)
        );
    }

    #[test]
    fn test_fixed_never_exceeds_subtotal() {
        let discount = Discount {
            discount_type: DiscountType::Fixed,
            value: 5000,
            min_order_value: None,
            max_discount_amount: None,
            ..percentage_discount()
        };
        assert_eq!(
            discount.amount_off(Price::from_paise(3000)),
            Price::from_paise(3000)
        );
        assert_eq!(
            discount.amount_off(Price::from_paise(80000)),
            Price::from_paise(5000)
        );
    }

    #[test]
    fn test_type_field_on_wire() {
        let json = serde_json::to_value(percentage_discount()).expect("serialize");
        assert_eq!(json["type"], "percentage");
        assert_eq!(json["minOrderValue"], 50000);
    }
}
