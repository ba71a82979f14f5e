//! Checkout route handlers.
//!
//! Checkout requires a logged-in customer. The form captures a shipping
//! address; submitting it creates the order on the backend from the
//! session cart, clears the cart, and redirects into the payment flow.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use pawcart_client::{CreateOrderRequest, OrderItemInput};
use pawcart_core::Address;

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::Cart;
use crate::routes::cart::CartView;
use crate::state::AppState;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub cart: CartView,
    pub address: Option<Address>,
    pub customer_name: String,
}

/// Shipping address form data.
#[derive(Debug, Deserialize)]
pub struct AddressForm {
    pub name: String,
    pub phone: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl AddressForm {
    fn into_address(self) -> Address {
        Address {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            line1: self.line1.trim().to_string(),
            line2: self
                .line2
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty()),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            pincode: self.pincode.trim().to_string(),
        }
    }
}

/// Display the checkout page with the order summary and address form.
///
/// An empty cart bounces back to the cart page; the address from a
/// previous order pre-fills the form.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    session: Session,
) -> Result<Response, AppError> {
    let cart = Cart::load(&session)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    Ok(CheckoutTemplate {
        cart: CartView::build(&state, &cart).await,
        address: cart.shipping_address.clone(),
        customer_name: customer.name,
    }
    .into_response())
}

/// Create the order and hand off to payment.
///
/// The backend re-validates inventory, pricing, and the discount code;
/// on success the cart is emptied (the address is kept for next time)
/// and the shopper is redirected to the gateway handoff page.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    session: Session,
    Form(form): Form<AddressForm>,
) -> Result<Response, AppError> {
    let mut cart = Cart::load(&session)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let address = form.into_address();
    if address.name.is_empty()
        || address.phone.is_empty()
        || address.line1.is_empty()
        || address.city.is_empty()
        || address.state.is_empty()
        || address.pincode.is_empty()
    {
        return Err(AppError::BadRequest(
            "All address fields except line 2 are required".to_string(),
        ));
    }

    let request = CreateOrderRequest {
        items: cart
            .items
            .iter()
            .map(|item| OrderItemInput {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
            })
            .collect(),
        shipping_address: address.clone(),
        discount_code: cart.discount_code.clone(),
    };

    let order = state.api().create_order(&customer.id, &request).await?;
    tracing::info!(order_id = %order.id, "Order created");

    cart.clear();
    cart.shipping_address = Some(address);
    cart.save(&session)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Redirect::to(&format!("/payment/{}", order.id)).into_response())
}
