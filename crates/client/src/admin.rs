//! Admin endpoints under `/admin/*`.
//!
//! Every mutation here is a thin call into the backend; the admin panel never
//! changes state locally. Catalog mutations invalidate the shared cache so
//! the storefront stops serving stale listings.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use pawcart_core::{Discount, DiscountId, DiscountType, Order, OrderId, OrderStatus, Price, Product, ProductId, TaxConfig};

use crate::catalog::{ProductPage, ProductQuery};
use crate::http::ApiClient;
use crate::orders::OrderPage;
use crate::ApiError;

/// Payload for creating or updating a product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub title: String,
    pub description: String,
    pub price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<Price>,
    pub category: String,
    pub inventory: i64,
    pub images: Vec<String>,
    pub tags: Vec<String>,
}

/// Payload for creating or updating a discount code.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountInput {
    pub code: String,
    #[serde(rename = "type")]
    pub discount_type: DiscountType,
    pub value: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_order_value: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_discount_amount: Option<Price>,
    pub first_time_only: bool,
}

/// Payload for recording a shipment on an order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentInput {
    pub courier: String,
    pub awb: String,
}

/// Payload for updating the tax configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxConfigInput {
    pub name: String,
    pub rate: f64,
    pub inclusive: bool,
    pub active: bool,
}

/// Pending work counters that drive the admin notification badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingCounts {
    pub orders: u64,
    pub refunds: u64,
    pub returns: u64,
}

#[derive(Deserialize)]
struct CountResponse {
    count: u64,
}

#[derive(Serialize)]
struct StatusUpdate {
    status: OrderStatus,
}

impl ApiClient {
    // =========================================================================
    // Products
    // =========================================================================

    /// List products for the admin catalog screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn admin_list_products(&self, query: &ProductQuery) -> Result<ProductPage, ApiError> {
        let mut params = Vec::new();
        if let Some(search) = &query.search {
            params.push(("search", search.clone()));
        }
        if let Some(page) = query.page {
            params.push(("page", page.to_string()));
        }
        self.send_json(self.request(Method::GET, "/admin/products").query(&params))
            .await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails server-side or the request fails.
    #[instrument(skip(self, input))]
    pub async fn admin_create_product(&self, input: &ProductInput) -> Result<Product, ApiError> {
        let product: Product = self
            .send_json(self.request(Method::POST, "/admin/products").json(input))
            .await?;
        self.invalidate_catalog().await;
        Ok(product)
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request fails.
    #[instrument(skip(self, input), fields(product_id = %product_id))]
    pub async fn admin_update_product(
        &self,
        product_id: &ProductId,
        input: &ProductInput,
    ) -> Result<Product, ApiError> {
        let product: Product = self
            .send_json(
                self.request(Method::PUT, &format!("/admin/products/{product_id}"))
                    .json(input),
            )
            .await?;
        self.invalidate_catalog().await;
        Ok(product)
    }

    /// Archive a product so it no longer appears in the storefront catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn admin_archive_product(&self, product_id: &ProductId) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, &format!("/admin/products/{product_id}")))
            .await?;
        self.invalidate_catalog().await;
        Ok(())
    }

    // =========================================================================
    // Discounts
    // =========================================================================

    /// List all discount codes, including expired and disabled ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn admin_list_discounts(&self) -> Result<Vec<Discount>, ApiError> {
        self.send_json(self.request(Method::GET, "/admin/discounts"))
            .await
    }

    /// Create a discount code.
    ///
    /// # Errors
    ///
    /// Returns an error if the code already exists or the request fails.
    #[instrument(skip(self, input))]
    pub async fn admin_create_discount(&self, input: &DiscountInput) -> Result<Discount, ApiError> {
        self.send_json(self.request(Method::POST, "/admin/discounts").json(input))
            .await
    }

    /// Update a discount code.
    ///
    /// # Errors
    ///
    /// Returns an error if the discount does not exist or the request fails.
    #[instrument(skip(self, input), fields(discount_id = %discount_id))]
    pub async fn admin_update_discount(
        &self,
        discount_id: &DiscountId,
        input: &DiscountInput,
    ) -> Result<Discount, ApiError> {
        self.send_json(
            self.request(Method::PUT, &format!("/admin/discounts/{discount_id}"))
                .json(input),
        )
        .await
    }

    /// Switch a discount off without deleting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the discount does not exist or the request fails.
    #[instrument(skip(self), fields(discount_id = %discount_id))]
    pub async fn admin_deactivate_discount(&self, discount_id: &DiscountId) -> Result<(), ApiError> {
        self.send_empty(self.request(
            Method::POST,
            &format!("/admin/discounts/{discount_id}/deactivate"),
        ))
        .await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// List orders, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn admin_list_orders(
        &self,
        status: Option<OrderStatus>,
        page: Option<u32>,
    ) -> Result<OrderPage, ApiError> {
        let mut params = Vec::new();
        if let Some(status) = status {
            params.push(("status", status.label().to_ascii_lowercase()));
        }
        if let Some(page) = page {
            params.push(("page", page.to_string()));
        }
        self.send_json(self.request(Method::GET, "/admin/orders").query(&params))
            .await
    }

    /// Get any order by ID.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the order does not exist.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn admin_get_order(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        self.send_json(self.request(Method::GET, &format!("/admin/orders/{order_id}")))
            .await
    }

    /// Move an order to a new status.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is rejected server-side.
    #[instrument(skip(self), fields(order_id = %order_id, status = ?status))]
    pub async fn admin_update_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        self.send_json(
            self.request(Method::POST, &format!("/admin/orders/{order_id}/status"))
                .json(&StatusUpdate { status }),
        )
        .await
    }

    /// Record a shipment (courier + AWB) against an order.
    ///
    /// Shipment/label creation itself is backend-owned; this only submits the
    /// admin's input.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not in a shippable state.
    #[instrument(skip(self, input), fields(order_id = %order_id))]
    pub async fn admin_create_shipment(
        &self,
        order_id: &OrderId,
        input: &ShipmentInput,
    ) -> Result<Order, ApiError> {
        self.send_json(
            self.request(Method::POST, &format!("/admin/orders/{order_id}/shipment"))
                .json(input),
        )
        .await
    }

    /// Cancel an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order can no longer be cancelled.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn admin_cancel_order(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        self.send_json(self.request(Method::POST, &format!("/admin/orders/{order_id}/cancel")))
            .await
    }

    // =========================================================================
    // Refunds and returns
    // =========================================================================

    /// Approve a pending refund request. Settlement happens backend-side.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no pending refund on the order.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn admin_approve_refund(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        self.send_json(self.request(
            Method::POST,
            &format!("/admin/orders/{order_id}/refund/approve"),
        ))
        .await
    }

    /// Reject a pending refund request.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no pending refund on the order.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn admin_reject_refund(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        self.send_json(self.request(
            Method::POST,
            &format!("/admin/orders/{order_id}/refund/reject"),
        ))
        .await
    }

    /// Approve a pending return request.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no pending return on the order.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn admin_approve_return(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        self.send_json(self.request(
            Method::POST,
            &format!("/admin/orders/{order_id}/return/approve"),
        ))
        .await
    }

    /// Reject a pending return request.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no pending return on the order.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn admin_reject_return(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        self.send_json(self.request(
            Method::POST,
            &format!("/admin/orders/{order_id}/return/reject"),
        ))
        .await
    }

    /// Mark an approved return as received back at the warehouse.
    ///
    /// # Errors
    ///
    /// Returns an error if the return is not in the approved state.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn admin_mark_return_received(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        self.send_json(self.request(
            Method::POST,
            &format!("/admin/orders/{order_id}/return/received"),
        ))
        .await
    }

    // =========================================================================
    // Badge counts and tax settings
    // =========================================================================

    /// Fetch the three pending-work counters in parallel.
    ///
    /// These are count-only probes issued by the 30-second badge poller.
    ///
    /// # Errors
    ///
    /// Returns an error if any probe fails; the poller keeps the previous
    /// counts in that case.
    #[instrument(skip(self))]
    pub async fn admin_pending_counts(&self) -> Result<PendingCounts, ApiError> {
        let (orders, refunds, returns) = futures::try_join!(
            self.pending_count("/admin/orders/pending-count"),
            self.pending_count("/admin/refunds/pending-count"),
            self.pending_count("/admin/returns/pending-count"),
        )?;
        Ok(PendingCounts {
            orders,
            refunds,
            returns,
        })
    }

    async fn pending_count(&self, path: &str) -> Result<u64, ApiError> {
        let response: CountResponse = self.send_json(self.request(Method::GET, path)).await?;
        Ok(response.count)
    }

    /// Get the tax configuration for the settings screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails. A 404 maps to `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn admin_tax_config(&self) -> Result<Option<TaxConfig>, ApiError> {
        match self
            .send_json::<TaxConfig>(self.request(Method::GET, "/admin/taxes"))
            .await
        {
            Ok(config) => Ok(Some(config)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Replace the tax configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails server-side.
    #[instrument(skip(self, input))]
    pub async fn admin_update_tax_config(
        &self,
        input: &TaxConfigInput,
    ) -> Result<TaxConfig, ApiError> {
        self.send_json(self.request(Method::PUT, "/admin/taxes").json(input))
            .await
    }
}
