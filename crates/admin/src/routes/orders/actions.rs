//! Single order action handlers.
//!
//! Every action is a backend call followed by a redirect back to the
//! detail page; the backend owns all transition and settlement rules.

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use pawcart_client::{ApiError, ShipmentInput};
use pawcart_core::{Order, OrderId, OrderStatus};

use crate::{middleware::RequireAdminAuth, state::AppState};

/// Input for a status transition.
#[derive(Debug, Deserialize)]
pub struct StatusInput {
    /// Target status in wire form, e.g. "shipped".
    pub status: String,
}

/// Input for recording a shipment.
#[derive(Debug, Deserialize)]
pub struct ShipInput {
    pub courier: String,
    pub awb: String,
}

fn back_to(order_id: &str) -> Response {
    Redirect::to(&format!("/orders/{order_id}")).into_response()
}

fn action_failed(action: &str, order_id: &str, e: &ApiError) -> Response {
    tracing::error!(order_id, error = %e, "Order action failed: {action}");
    (StatusCode::BAD_REQUEST, format!("{action} failed: {e}")).into_response()
}

fn log_and_back(action: &str, order: &Order) -> Response {
    tracing::info!(order_id = %order.id, status = ?order.status, "{action}");
    back_to(order.id.as_str())
}

/// Move an order to a new status.
#[instrument(skip(_admin, state))]
pub async fn update_status(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<StatusInput>,
) -> Response {
    let Ok(status) =
        serde_json::from_value::<OrderStatus>(serde_json::Value::String(input.status.clone()))
    else {
        return (
            StatusCode::BAD_REQUEST,
            format!("Unknown status: {}", input.status),
        )
            .into_response();
    };

    match state
        .api()
        .admin_update_order_status(&OrderId::new(id.clone()), status)
        .await
    {
        Ok(order) => log_and_back("Status updated", &order),
        Err(e) => action_failed("Status update", &id, &e),
    }
}

/// Record a courier and AWB against the order.
#[instrument(skip(_admin, state, input))]
pub async fn create_shipment(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<ShipInput>,
) -> Response {
    let courier = input.courier.trim().to_string();
    let awb = input.awb.trim().to_string();
    if courier.is_empty() || awb.is_empty() {
        return (StatusCode::BAD_REQUEST, "Courier and AWB are required").into_response();
    }

    match state
        .api()
        .admin_create_shipment(&OrderId::new(id.clone()), &ShipmentInput { courier, awb })
        .await
    {
        Ok(order) => log_and_back("Shipment recorded", &order),
        Err(e) => action_failed("Shipment", &id, &e),
    }
}

/// Cancel the order.
#[instrument(skip(_admin, state))]
pub async fn cancel(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.api().admin_cancel_order(&OrderId::new(id.clone())).await {
        Ok(order) => log_and_back("Order cancelled", &order),
        Err(e) => action_failed("Cancel", &id, &e),
    }
}

/// Approve a pending refund.
#[instrument(skip(_admin, state))]
pub async fn approve_refund(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state
        .api()
        .admin_approve_refund(&OrderId::new(id.clone()))
        .await
    {
        Ok(order) => log_and_back("Refund approved", &order),
        Err(e) => action_failed("Refund approval", &id, &e),
    }
}

/// Reject a pending refund.
#[instrument(skip(_admin, state))]
pub async fn reject_refund(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state
        .api()
        .admin_reject_refund(&OrderId::new(id.clone()))
        .await
    {
        Ok(order) => log_and_back("Refund rejected", &order),
        Err(e) => action_failed("Refund rejection", &id, &e),
    }
}

/// Approve a pending return.
#[instrument(skip(_admin, state))]
pub async fn approve_return(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state
        .api()
        .admin_approve_return(&OrderId::new(id.clone()))
        .await
    {
        Ok(order) => log_and_back("Return approved", &order),
        Err(e) => action_failed("Return approval", &id, &e),
    }
}

/// Reject a pending return.
#[instrument(skip(_admin, state))]
pub async fn reject_return(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state
        .api()
        .admin_reject_return(&OrderId::new(id.clone()))
        .await
    {
        Ok(order) => log_and_back("Return rejected", &order),
        Err(e) => action_failed("Return rejection", &id, &e),
    }
}

/// Mark an approved return as received back at the warehouse.
#[instrument(skip(_admin, state))]
pub async fn mark_return_received(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state
        .api()
        .admin_mark_return_received(&OrderId::new(id.clone()))
        .await
    {
        Ok(order) => log_and_back("Return received", &order),
        Err(e) => action_failed("Return receipt", &id, &e),
    }
}
