//! Order detail route handler.

use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::instrument;

use pawcart_core::{Order, OrderId, OrderStatus};

use crate::{filters, middleware::RequireAdminAuth, state::AppState};

/// One order line for the detail page.
pub struct OrderItemView {
    pub title: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
}

/// Refund sub-document view.
pub struct RefundView {
    pub status: String,
    pub amount: String,
    pub reason: Option<String>,
    pub pending: bool,
}

/// Return sub-document view.
pub struct ReturnView {
    pub status: String,
    pub reason: Option<String>,
    pub pending: bool,
    pub approved: bool,
}

/// Full order view for the detail page.
pub struct OrderDetailView {
    pub id: String,
    pub status: String,
    pub payment_status: String,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
    pub items: Vec<OrderItemView>,
    pub customer: String,
    pub phone: String,
    pub address_summary: String,
    pub subtotal: String,
    pub discount: String,
    pub tax: String,
    pub shipping_cost: String,
    pub total: String,
    pub tracking: Option<(String, String)>,
    pub refund: Option<RefundView>,
    pub return_request: Option<ReturnView>,
    pub created_at: String,
    pub cancellable: bool,
    pub shippable: bool,
    pub next_statuses: Vec<&'static str>,
}

/// Statuses an admin can move the order to from its current state.
///
/// The backend enforces the real transition rules; this only trims the
/// dropdown to transitions that can possibly succeed.
fn next_statuses(status: OrderStatus) -> Vec<&'static str> {
    match status {
        OrderStatus::Pending => vec!["confirmed", "cancelled"],
        OrderStatus::Confirmed => vec!["processing", "cancelled"],
        OrderStatus::Processing => vec!["shipped", "cancelled"],
        OrderStatus::Shipped => vec!["delivered"],
        OrderStatus::Delivered | OrderStatus::Cancelled => vec![],
    }
}

impl From<&Order> for OrderDetailView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            status: order.status.label().to_string(),
            payment_status: order.payment.status.label().to_string(),
            payment_method: order.payment.method.map(|m| m.label().to_string()),
            transaction_id: order.payment.transaction_id.clone(),
            items: order
                .items
                .iter()
                .map(|item| OrderItemView {
                    title: item.title.clone(),
                    quantity: item.quantity,
                    price: item.price.to_string(),
                    line_total: item.line_total().to_string(),
                })
                .collect(),
            customer: order.shipping_address.name.clone(),
            phone: order.shipping_address.phone.clone(),
            address_summary: order.shipping_address.summary(),
            subtotal: order.pricing.subtotal.to_string(),
            discount: order.pricing.discount.to_string(),
            tax: order.pricing.tax.to_string(),
            shipping_cost: order.pricing.shipping_cost.to_string(),
            total: order.pricing.amount.to_string(),
            tracking: order
                .tracking()
                .map(|(awb, courier)| (awb.to_string(), courier.to_string())),
            refund: order.refund.as_ref().map(|refund| RefundView {
                status: refund.status.label().to_string(),
                amount: refund.amount.to_string(),
                reason: refund.reason.clone(),
                pending: refund.status.is_pending(),
            }),
            return_request: order.return_request.as_ref().map(|ret| ReturnView {
                status: ret.status.label().to_string(),
                reason: ret.reason.clone(),
                pending: ret.status.is_pending(),
                approved: ret.status == pawcart_core::ReturnStatus::Approved,
            }),
            created_at: order.created_at.to_rfc3339(),
            cancellable: order.status.is_cancellable(),
            shippable: order.status == OrderStatus::Processing && order.logistics.is_none(),
            next_statuses: next_statuses(order.status),
        }
    }
}

/// Order detail page template.
#[derive(Template)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub order: OrderDetailView,
}

/// Order detail page handler.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.api().admin_get_order(&OrderId::new(id)).await {
        Ok(order) => {
            let template = OrderShowTemplate {
                order: OrderDetailView::from(&order),
            };
            Html(template.render().unwrap_or_else(|e| {
                tracing::error!("Template render error: {}", e);
                "Internal Server Error".to_string()
            }))
            .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to fetch order: {e}");
            (StatusCode::NOT_FOUND, "Order not found").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_statuses_trim_terminal_states() {
        assert_eq!(next_statuses(OrderStatus::Pending), vec!["confirmed", "cancelled"]);
        assert!(next_statuses(OrderStatus::Delivered).is_empty());
        assert!(next_statuses(OrderStatus::Cancelled).is_empty());
    }
}
