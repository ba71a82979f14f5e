//! Payment route handlers.
//!
//! The handoff page renders the backend-signed gateway form as hidden
//! inputs and auto-submits it to the hosted payment page. The gateway
//! returns the shopper to `/payment/return`, where a bounded status poll
//! decides how the flow ends.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use pawcart_client::{GatewayField, PaymentVerification};
use pawcart_core::OrderId;

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Gateway handoff template. Auto-submits the signed form on load.
#[derive(Template, WebTemplate)]
#[template(path = "payment/gateway.html")]
pub struct GatewayTemplate {
    pub action_url: String,
    pub fields: Vec<GatewayField>,
}

/// Payment failure template.
#[derive(Template, WebTemplate)]
#[template(path = "payment/failed.html")]
pub struct PaymentFailedTemplate {
    pub order_id: String,
    pub message: String,
}

/// Query parameters posted back by the gateway on return.
///
/// `udf1` carries the order ID on success legs; failure legs carry
/// `orderId` plus an `error_Message`. Field names are fixed by the
/// gateway contract.
#[derive(Debug, Deserialize)]
pub struct GatewayReturnParams {
    pub udf1: Option<String>,
    #[serde(rename = "orderId")]
    pub order_id: Option<String>,
    #[serde(rename = "error_Message")]
    pub error_message: Option<String>,
}

/// Render the auto-submitting gateway form for an order.
#[instrument(skip(state))]
pub async fn pay(
    State(state): State<AppState>,
    RequireAuth(_customer): RequireAuth,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let form = state
        .api()
        .initiate_payment(&OrderId::new(order_id))
        .await?;

    Ok(GatewayTemplate {
        action_url: form.action_url,
        fields: form.fields,
    })
}

/// Handle the gateway return leg.
///
/// An explicit error message short-circuits to the failure page. Otherwise
/// the payment status is polled until the backend confirms, reports a
/// failure, or the window elapses; an elapsed window proceeds as if paid
/// and the order page shows the real status once webhooks land.
#[instrument(skip(state))]
pub async fn gateway_return(
    State(state): State<AppState>,
    Query(params): Query<GatewayReturnParams>,
) -> Result<Response, AppError> {
    let order_id = params
        .udf1
        .or(params.order_id)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing order reference".to_string()))?;

    if let Some(message) = params.error_message.filter(|m| !m.is_empty()) {
        tracing::warn!(%order_id, "Gateway reported payment failure");
        return Ok(PaymentFailedTemplate { order_id, message }.into_response());
    }

    let poll = state.config().payment_poll;
    let verification = state
        .api()
        .await_payment_confirmation(&OrderId::new(order_id.clone()), poll.interval, poll.timeout)
        .await;

    match verification {
        PaymentVerification::Confirmed => {
            Ok(Redirect::to(&format!("/orders/{order_id}?verified=1")).into_response())
        }
        PaymentVerification::AssumedAfterTimeout => {
            tracing::warn!(%order_id, "Payment confirmation window elapsed, proceeding");
            Ok(Redirect::to(&format!("/orders/{order_id}")).into_response())
        }
        PaymentVerification::Failed => Ok(PaymentFailedTemplate {
            order_id,
            message: "The payment was not completed".to_string(),
        }
        .into_response()),
    }
}
