//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the session; the backend is only consulted to
//! snapshot product data on add and to resolve the applied discount code
//! and active tax for the totals block.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use pawcart_core::{Discount, ProductId, TaxConfig};

use crate::filters;
use crate::models::{Cart, CartItem};
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: String,
    pub title: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: Option<String>,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id.to_string(),
            title: item.title.clone(),
            quantity: item.quantity,
            price: item.unit_price.to_string(),
            line_price: item.line_total().to_string(),
            image: item.image.clone(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    pub subtotal: String,
    pub discount_code: Option<String>,
    pub discount: Option<String>,
    pub tax_line: Option<String>,
    pub tax_inclusive_note: Option<String>,
    pub total: String,
    /// Message shown next to the discount form, e.g. for a rejected code.
    pub discount_error: Option<String>,
}

impl CartView {
    /// Build the display view, resolving the applied discount code against
    /// the live discount list and fetching the active tax config. Both
    /// lookups degrade silently so a backend hiccup never blanks the cart.
    pub async fn build(state: &AppState, cart: &Cart) -> Self {
        let discount = match &cart.discount_code {
            Some(code) => resolve_discount(state, code).await,
            None => None,
        };
        let tax = active_tax(state).await;

        Self::from_parts(cart, discount.as_ref(), tax.as_ref(), None)
    }

    fn from_parts(
        cart: &Cart,
        discount: Option<&Discount>,
        tax: Option<&TaxConfig>,
        discount_error: Option<String>,
    ) -> Self {
        let totals = cart.totals(discount, tax);

        Self {
            items: cart.items.iter().map(CartItemView::from).collect(),
            item_count: cart.item_count(),
            subtotal: totals.subtotal.to_string(),
            discount_code: discount.map(|d| d.code.clone()),
            discount: (!totals.discount.is_zero()).then(|| totals.discount.to_string()),
            tax_line: totals
                .tax_label
                .as_ref()
                .filter(|_| !totals.tax_inclusive)
                .map(|label| format!("{label}: {}", totals.tax)),
            tax_inclusive_note: totals
                .tax_label
                .filter(|_| totals.tax_inclusive)
                .map(|label| format!("Prices include {label}")),
            total: totals.total.to_string(),
            discount_error,
        }
    }
}

/// Resolve an applied code to a currently live discount, or `None`.
async fn resolve_discount(state: &AppState, code: &str) -> Option<Discount> {
    match state.api().find_live_discount(code).await {
        Ok(discount) => discount,
        Err(e) => {
            tracing::warn!("Failed to resolve discount code: {e}");
            None
        }
    }
}

/// Fetch the active tax config, or `None` when unavailable.
async fn active_tax(state: &AppState) -> Option<TaxConfig> {
    match state.api().active_tax().await {
        Ok(tax) => tax.filter(|t| t.active),
        Err(e) => {
            tracing::warn!("Failed to fetch tax config: {e}");
            None
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

/// Discount code form data.
#[derive(Debug, Deserialize)]
pub struct DiscountForm {
    pub code: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display the cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Response {
    let cart = match Cart::load(&session).await {
        Ok(cart) => cart,
        Err(e) => {
            tracing::error!("Failed to load cart from session: {e}");
            Cart::default()
        }
    };

    CartShowTemplate {
        cart: CartView::build(&state, &cart).await,
    }
    .into_response()
}

/// Add an item to the cart (HTMX).
///
/// Snapshots the product title and price from the catalog so the cart can
/// render without further lookups. Returns the count badge with an HTMX
/// trigger so other fragments refresh.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let product_id = ProductId::new(form.product_id);
    let product = match state.api().get_product(&product_id).await {
        Ok(product) => product,
        Err(e) => {
            tracing::error!("Failed to fetch product for cart add: {e}");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html("<span class=\"error\">Could not add to cart</span>"),
            )
                .into_response();
        }
    };

    if !product.in_stock() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html("<span class=\"error\">Out of stock</span>"),
        )
            .into_response();
    }

    let mut cart = Cart::load(&session).await.unwrap_or_default();
    cart.add(CartItem {
        product_id,
        title: product.title.clone(),
        unit_price: product.price,
        quantity: form.quantity.unwrap_or(1),
        image: product.featured_image().map(String::from),
    });

    if let Err(e) = cart.save(&session).await {
        tracing::error!("Failed to save cart to session: {e}");
    }

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.item_count(),
        },
    )
        .into_response()
}

/// Update a line quantity (HTMX). Zero removes the line.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let mut cart = Cart::load(&session).await.unwrap_or_default();
    cart.set_quantity(&ProductId::new(form.product_id), form.quantity);

    if let Err(e) = cart.save(&session).await {
        tracing::error!("Failed to save cart to session: {e}");
    }

    items_fragment(&state, &cart).await
}

/// Remove a line from the cart (HTMX).
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let mut cart = Cart::load(&session).await.unwrap_or_default();
    cart.remove(&ProductId::new(form.product_id));

    if let Err(e) = cart.save(&session).await {
        tracing::error!("Failed to save cart to session: {e}");
    }

    items_fragment(&state, &cart).await
}

/// Get the cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = Cart::load(&session).await.unwrap_or_default();
    CartCountTemplate {
        count: cart.item_count(),
    }
}

/// Apply a discount code (HTMX).
///
/// Only codes that are active and inside their validity window are
/// accepted; anything else leaves the cart unchanged and reports why.
#[instrument(skip(state, session))]
pub async fn apply_discount(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<DiscountForm>,
) -> Response {
    let code = form.code.trim().to_string();
    let mut cart = Cart::load(&session).await.unwrap_or_default();

    let discount = if code.is_empty() {
        None
    } else {
        resolve_discount(&state, &code).await
    };

    let Some(discount) = discount else {
        let tax = active_tax(&state).await;
        return (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartItemsTemplate {
                cart: CartView::from_parts(
                    &cart,
                    None,
                    tax.as_ref(),
                    Some("That code is not valid right now".to_string()),
                ),
            },
        )
            .into_response();
    };

    cart.discount_code = Some(discount.code.clone());
    if let Err(e) = cart.save(&session).await {
        tracing::error!("Failed to save cart to session: {e}");
    }

    let tax = active_tax(&state).await;
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from_parts(&cart, Some(&discount), tax.as_ref(), None),
        },
    )
        .into_response()
}

/// Drop the applied discount code (HTMX).
#[instrument(skip(state, session))]
pub async fn remove_discount(State(state): State<AppState>, session: Session) -> Response {
    let mut cart = Cart::load(&session).await.unwrap_or_default();
    cart.discount_code = None;

    if let Err(e) = cart.save(&session).await {
        tracing::error!("Failed to save cart to session: {e}");
    }

    items_fragment(&state, &cart).await
}

async fn items_fragment(state: &AppState, cart: &Cart) -> Response {
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::build(state, cart).await,
        },
    )
        .into_response()
}
