//! Payment endpoints: gateway handoff.
//!
//! The backend signs the gateway payload (hash computation is out of scope
//! here); this client only fetches the prepared form and the storefront
//! renders it as a hidden auto-submitting POST to the hosted payment page.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use pawcart_core::OrderId;

use crate::http::ApiClient;
use crate::ApiError;

/// One hidden field of the gateway form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayField {
    pub name: String,
    pub value: String,
}

/// A prepared, backend-signed gateway form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayForm {
    /// Hosted payment page URL the form posts to.
    pub action_url: String,
    pub fields: Vec<GatewayField>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InitiatePaymentRequest<'a> {
    order_id: &'a OrderId,
}

impl ApiClient {
    /// Ask the backend to prepare a signed gateway form for an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not payable or the request fails.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn initiate_payment(&self, order_id: &OrderId) -> Result<GatewayForm, ApiError> {
        self.send_json(
            self.request(Method::POST, "/payments/initiate")
                .json(&InitiatePaymentRequest { order_id }),
        )
        .await
    }
}
