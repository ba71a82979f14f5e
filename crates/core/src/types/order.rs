//! Order entity mirror and its sub-documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    Address, OrderId, OrderStatus, PaymentMethod, PaymentStatus, Price, ProductId, RefundId,
    RefundStatus, ReturnStatus,
};

/// A single order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Unit price in paise at the time the order was placed.
    pub price: Price,
    pub quantity: u32,
}

impl OrderItem {
    /// Line total in paise.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Authoritative price breakdown computed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub subtotal: Price,
    #[serde(default)]
    pub discount: Price,
    #[serde(default)]
    pub tax: Price,
    #[serde(default)]
    pub shipping_cost: Price,
    /// Grand total charged at the gateway.
    pub amount: Price,
}

/// Payment sub-object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

/// Logistics sub-object, present once a shipment has been created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Logistics {
    /// Air Waybill number issued by the logistics partner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courier: Option<String>,
}

/// Refund sub-document, mutated only by backend actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundInfo {
    pub id: RefundId,
    pub status: RefundStatus,
    pub amount: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub requested_at: DateTime<Utc>,
}

/// Return request sub-document, mutated only by backend actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    pub status: ReturnStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub requested_at: DateTime<Utc>,
}

/// An order as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub payment: PaymentInfo,
    pub items: Vec<OrderItem>,
    pub shipping_address: Address,
    #[serde(flatten)]
    pub pricing: PriceBreakdown,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logistics: Option<Logistics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund: Option<RefundInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_request: Option<ReturnRequest>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Tracking identifier and courier, when the order has shipped.
    #[must_use]
    pub fn tracking(&self) -> Option<(&str, &str)> {
        let logistics = self.logistics.as_ref()?;
        Some((logistics.awb.as_deref()?, logistics.courier.as_deref()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Address;

    fn sample_order() -> Order {
        Order {
            id: OrderId::new("ord-1"),
            status: OrderStatus::Confirmed,
            payment: PaymentInfo {
                status: PaymentStatus::Paid,
                method: Some(PaymentMethod::Upi),
                transaction_id: Some("txn-9".to_string()),
            },
            items: vec![
                OrderItem {
                    product_id: ProductId::new("p-1"),
                    title: "Salmon Treats".to_string(),
                    image: None,
                    price: Price::from_paise(19900),
                    quantity: 2,
                },
                OrderItem {
                    product_id: ProductId::new("p-2"),
                    title: "Rope Toy".to_string(),
                    image: None,
                    price: Price::from_paise(9900),
                    quantity: 1,
                },
            ],
            shipping_address: Address {
                name: "A Kumar".to_string(),
                phone: "9876543210".to_string(),
                line1: "12 MG Road".to_string(),
                line2: None,
                city: "Bengaluru".to_string(),
                state: "Karnataka".to_string(),
                pincode: "560001".to_string(),
            },
            pricing: PriceBreakdown {
                subtotal: Price::from_paise(49700),
                discount: Price::from_paise(4970),
                tax: Price::from_paise(8051),
                shipping_cost: Price::from_paise(4900),
                amount: Price::from_paise(57681),
            },
            logistics: None,
            refund: None,
            return_request: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_item_count() {
        assert_eq!(sample_order().item_count(), 3);
    }

    #[test]
    fn test_pricing_flattened_on_wire() {
        let json = serde_json::to_value(sample_order()).expect("serialize");
        assert_eq!(json["subtotal"], 49700);
        assert_eq!(json["shippingCost"], 4900);
        assert_eq!(json["amount"], 57681);
        assert!(json.get("pricing").is_none());
    }

    #[test]
    fn test_tracking_requires_both_fields() {
        let mut order = sample_order();
        assert_eq!(order.tracking(), None);
        order.logistics = Some(Logistics {
            awb: Some("AWB123".to_string()),
            courier: None,
        });
        assert_eq!(order.tracking(), None);
        order.logistics = Some(Logistics {
            awb: Some("AWB123".to_string()),
            courier: Some("BlueDart".to_string()),
        });
        assert_eq!(order.tracking(), Some(("AWB123", "BlueDart")));
    }
}
