//! Order endpoints: creation, history, and payment-status polling.

use std::time::Duration;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{instrument, warn};

use pawcart_core::{Address, Order, OrderId, PaymentStatus, ProductId};

use crate::http::{ApiClient, CUSTOMER_HEADER};
use crate::ApiError;

/// A cart line submitted at checkout. Pricing is resolved server-side.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Payload for creating an order from cart contents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemInput>,
    pub shipping_address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
}

/// A page of orders (admin listing).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPage {
    pub orders: Vec<Order>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page")]
    pub total_pages: u32,
}

const fn default_page() -> u32 {
    1
}

/// Outcome of the bounded payment-confirmation poll.
///
/// `AssumedAfterTimeout` is a product-level behavioral choice, not a verified
/// payment guarantee: when the status endpoint never reports `paid` within the
/// window, the flow proceeds as if it had.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentVerification {
    /// The status endpoint reported `paid` within the window.
    Confirmed,
    /// The status endpoint reported `failed`.
    Failed,
    /// The window elapsed without a terminal status.
    AssumedAfterTimeout,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentStatusResponse {
    payment_status: PaymentStatus,
}

impl ApiClient {
    /// Create an order from cart contents.
    ///
    /// The backend re-validates inventory, pricing, and the discount code;
    /// the session cart is never authoritative.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails server-side or the request fails.
    #[instrument(skip(self, request), fields(customer_id = %customer_id))]
    pub async fn create_order(
        &self,
        customer_id: &str,
        request: &CreateOrderRequest,
    ) -> Result<Order, ApiError> {
        self.send_json(
            self.request(Method::POST, "/orders")
                .header(CUSTOMER_HEADER, customer_id)
                .json(request),
        )
        .await
    }

    /// Get one of the customer's orders.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the order does not exist or does not
    /// belong to the customer.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn get_order(&self, customer_id: &str, order_id: &OrderId) -> Result<Order, ApiError> {
        self.send_json(
            self.request(Method::GET, &format!("/orders/{order_id}"))
                .header(CUSTOMER_HEADER, customer_id),
        )
        .await
    }

    /// List the customer's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, customer_id: &str) -> Result<Vec<Order>, ApiError> {
        self.send_json(
            self.request(Method::GET, "/orders")
                .header(CUSTOMER_HEADER, customer_id),
        )
        .await
    }

    /// Lightweight payment-status probe for an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn payment_status(&self, order_id: &OrderId) -> Result<PaymentStatus, ApiError> {
        let response: PaymentStatusResponse = self
            .send_json(self.request(
                Method::GET,
                &format!("/orders/{order_id}/payment-status"),
            ))
            .await?;
        Ok(response.payment_status)
    }

    /// Poll the payment status every `interval` until `paid`, `failed`, or
    /// the `timeout` elapses.
    ///
    /// Probe errors are logged and treated like a still-pending status; there
    /// is no retry policy beyond continuing the poll.
    pub async fn await_payment_confirmation(
        &self,
        order_id: &OrderId,
        interval: Duration,
        timeout: Duration,
    ) -> PaymentVerification {
        let deadline = Instant::now() + timeout;

        loop {
            match self.payment_status(order_id).await {
                Ok(PaymentStatus::Paid) => return PaymentVerification::Confirmed,
                Ok(PaymentStatus::Failed) => return PaymentVerification::Failed,
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, %order_id, "Payment status probe failed, continuing poll");
                }
            }

            if Instant::now() + interval > deadline {
                return PaymentVerification::AssumedAfterTimeout;
            }
            tokio::time::sleep(interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_order_request_skips_absent_code() {
        let request = CreateOrderRequest {
            items: vec![OrderItemInput {
                product_id: ProductId::new("p-1"),
                quantity: 2,
            }],
            shipping_address: Address {
                name: "A Kumar".to_string(),
                phone: "9876543210".to_string(),
                line1: "12 MG Road".to_string(),
                line2: None,
                city: "Bengaluru".to_string(),
                state: "Karnataka".to_string(),
                pincode: "560001".to_string(),
            },
            discount_code: None,
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert!(json.get("discountCode").is_none());
        assert_eq!(json["items"][0]["productId"], "p-1");
    }
}
