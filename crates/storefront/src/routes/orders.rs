//! Customer order history route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use pawcart_core::{Order, OrderId};

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Order display data for the history list.
pub struct OrderSummaryView {
    pub id: String,
    pub status: String,
    pub item_count: u32,
    pub total: String,
    pub created_at: String,
}

impl From<&Order> for OrderSummaryView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            status: order.status.label().to_string(),
            item_count: order.item_count(),
            total: order.pricing.amount.to_string(),
            created_at: order.created_at.to_rfc3339(),
        }
    }
}

/// Order line display data.
pub struct OrderItemView {
    pub title: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
    pub image: Option<String>,
}

/// Order display data for the detail page.
pub struct OrderDetailView {
    pub id: String,
    pub status: String,
    pub payment_status: String,
    pub items: Vec<OrderItemView>,
    pub address_name: String,
    pub address_summary: String,
    pub subtotal: String,
    pub discount: Option<String>,
    pub tax: Option<String>,
    pub shipping_cost: String,
    pub total: String,
    pub tracking: Option<(String, String)>,
    pub created_at: String,
}

impl From<&Order> for OrderDetailView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            status: order.status.label().to_string(),
            payment_status: order.payment.status.label().to_string(),
            items: order
                .items
                .iter()
                .map(|item| OrderItemView {
                    title: item.title.clone(),
                    quantity: item.quantity,
                    price: item.price.to_string(),
                    line_total: item.line_total().to_string(),
                    image: item.image.clone(),
                })
                .collect(),
            address_name: order.shipping_address.name.clone(),
            address_summary: order.shipping_address.summary(),
            subtotal: order.pricing.subtotal.to_string(),
            discount: (!order.pricing.discount.is_zero())
                .then(|| order.pricing.discount.to_string()),
            tax: (!order.pricing.tax.is_zero()).then(|| order.pricing.tax.to_string()),
            shipping_cost: order.pricing.shipping_cost.to_string(),
            total: order.pricing.amount.to_string(),
            tracking: order
                .tracking()
                .map(|(awb, courier)| (awb.to_string(), courier.to_string())),
            created_at: order.created_at.to_rfc3339(),
        }
    }
}

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrderIndexTemplate {
    pub orders: Vec<OrderSummaryView>,
}

/// Order detail template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub order: OrderDetailView,
    pub just_paid: bool,
}

#[derive(Debug, Deserialize)]
pub struct ShowParams {
    pub verified: Option<u8>,
}

/// Display the customer's order history, newest first.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
) -> Result<impl IntoResponse, AppError> {
    let orders = state.api().list_orders(&customer.id).await?;

    Ok(OrderIndexTemplate {
        orders: orders.iter().map(OrderSummaryView::from).collect(),
    })
}

/// Display one order with its tracking details, if shipped.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Path(id): Path<String>,
    Query(params): Query<ShowParams>,
) -> Result<impl IntoResponse, AppError> {
    let order = state
        .api()
        .get_order(&customer.id, &OrderId::new(id))
        .await?;

    Ok(OrderShowTemplate {
        order: OrderDetailView::from(&order),
        just_paid: params.verified == Some(1),
    })
}
