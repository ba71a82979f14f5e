//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

/// Session-stored customer identity.
///
/// Minimal data stored in the session to identify the logged-in customer.
/// The backend validated the credentials at login; everything else is
/// fetched per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentCustomer {
    /// Customer's backend ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address used at login.
    pub email: String,
}

/// Session keys for storefront data.
pub mod keys {
    /// Key for storing the current logged-in customer.
    pub const CURRENT_CUSTOMER: &str = "current_customer";

    /// Key for the shopping cart.
    pub const CART: &str = "cart";
}
