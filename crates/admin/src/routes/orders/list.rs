//! Order listing route handler.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::instrument;

use pawcart_core::{Order, OrderStatus};

use crate::{filters, middleware::RequireAdminAuth, state::AppState};

/// Order view for the listing.
#[derive(Debug, Clone)]
pub struct OrderRowView {
    pub id: String,
    pub customer: String,
    pub status: String,
    pub payment_status: String,
    pub total: String,
    pub item_count: u32,
    pub created_at: String,
    pub needs_attention: bool,
}

impl From<&Order> for OrderRowView {
    fn from(order: &Order) -> Self {
        let needs_attention = order
            .refund
            .as_ref()
            .is_some_and(|r| r.status.is_pending())
            || order
                .return_request
                .as_ref()
                .is_some_and(|r| r.status.is_pending());

        Self {
            id: order.id.to_string(),
            customer: order.shipping_address.name.clone(),
            status: order.status.label().to_string(),
            payment_status: order.payment.status.label().to_string(),
            total: order.pricing.amount.to_string(),
            item_count: order.item_count(),
            created_at: order.created_at.to_rfc3339(),
            needs_attention,
        }
    }
}

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub page: Option<u32>,
}

/// Orders list page template.
#[derive(Template)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub orders: Vec<OrderRowView>,
    pub status_filter: Option<String>,
    pub page: u32,
    pub total_pages: u32,
}

fn parse_status(value: &str) -> Option<OrderStatus> {
    serde_json::from_value(serde_json::Value::String(value.to_string())).ok()
}

/// Orders list page handler with an optional status filter.
#[instrument(skip(_admin, state))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let status = query.status.as_deref().and_then(parse_status);

    let (orders, page, total_pages) = match state.api().admin_list_orders(status, query.page).await
    {
        Ok(page) => (
            page.orders.iter().map(OrderRowView::from).collect(),
            page.page,
            page.total_pages,
        ),
        Err(e) => {
            tracing::error!("Failed to fetch orders: {e}");
            (vec![], 1, 1)
        }
    };

    let template = OrdersIndexTemplate {
        orders,
        status_filter: query.status,
        page,
        total_pages,
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_snake_case() {
        assert_eq!(parse_status("shipped"), Some(OrderStatus::Shipped));
        assert_eq!(parse_status("cancelled"), Some(OrderStatus::Cancelled));
        assert_eq!(parse_status("bogus"), None);
    }
}
