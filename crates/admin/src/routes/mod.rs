//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Dashboard
//! GET  /health                   - Health check
//!
//! # Auth
//! GET  /auth/login               - Login page
//! POST /auth/login               - Login action (admin accounts only)
//! POST /auth/logout              - Logout action
//!
//! # Products
//! GET  /products                 - Catalog listing
//! GET  /products/new             - New product form
//! POST /products                 - Create product
//! GET  /products/{id}/edit       - Edit product form
//! POST /products/{id}            - Update product
//! POST /products/{id}/archive    - Archive product
//!
//! # Discounts
//! GET  /discounts                - Discount listing (live and expired)
//! GET  /discounts/new            - New discount form
//! POST /discounts                - Create discount
//! GET  /discounts/{id}/edit      - Edit discount form
//! POST /discounts/{id}           - Update discount
//! POST /discounts/{id}/deactivate - Switch a discount off
//!
//! # Orders
//! GET  /orders                   - Order listing with status filter
//! GET  /orders/{id}              - Order detail
//! POST /orders/{id}/status       - Move the order to a new status
//! POST /orders/{id}/ship         - Record courier + AWB
//! POST /orders/{id}/cancel       - Cancel the order
//! POST /orders/{id}/refund/approve  - Approve a pending refund
//! POST /orders/{id}/refund/reject   - Reject a pending refund
//! POST /orders/{id}/return/approve  - Approve a pending return
//! POST /orders/{id}/return/reject   - Reject a pending return
//! POST /orders/{id}/return/received - Mark an approved return received
//!
//! # Settings
//! GET  /taxes                    - Tax settings
//! POST /taxes                    - Replace tax settings
//!
//! # API (HTMX fragments)
//! GET  /api/badges               - Pending-work badge fragment
//! ```

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod discounts;
pub mod orders;
pub mod products;
pub mod taxes;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/new", get(products::new_form))
        .route("/{id}", post(products::update))
        .route("/{id}/edit", get(products::edit_form))
        .route("/{id}/archive", post(products::archive))
}

/// Create the discount routes router.
pub fn discount_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(discounts::index).post(discounts::create))
        .route("/new", get(discounts::new_form))
        .route("/{id}", post(discounts::update))
        .route("/{id}/edit", get(discounts::edit_form))
        .route("/{id}/deactivate", post(discounts::deactivate))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list::index))
        .route("/{id}", get(orders::detail::show))
        .route("/{id}/status", post(orders::actions::update_status))
        .route("/{id}/ship", post(orders::actions::create_shipment))
        .route("/{id}/cancel", post(orders::actions::cancel))
        .route("/{id}/refund/approve", post(orders::actions::approve_refund))
        .route("/{id}/refund/reject", post(orders::actions::reject_refund))
        .route("/{id}/return/approve", post(orders::actions::approve_return))
        .route("/{id}/return/reject", post(orders::actions::reject_return))
        .route(
            "/{id}/return/received",
            post(orders::actions::mark_return_received),
        )
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .nest("/products", product_routes())
        .nest("/discounts", discount_routes())
        .nest("/orders", order_routes())
        .route("/taxes", get(taxes::show).post(taxes::update))
        .nest("/auth", auth_routes())
        .route("/api/badges", get(api::badges))
}
