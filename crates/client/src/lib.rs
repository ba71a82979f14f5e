//! PawCart REST backend client.
//!
//! # Architecture
//!
//! - The backend is the source of truth - no local sync, direct API calls
//! - Bearer access token attached to every request, refreshed on 401 with a
//!   single-flight queue: concurrent 401s trigger exactly one refresh call
//! - In-memory caching via `moka` for catalog responses (5 minute TTL)
//!
//! # Example
//!
//! ```rust,ignore
//! use pawcart_client::{ApiClient, BackendConfig, ProductQuery};
//!
//! let client = ApiClient::new(&config)?;
//!
//! // Browse the catalog
//! let page = client.list_products(&ProductQuery::default()).await?;
//!
//! // Place an order for a customer
//! let order = client.create_order("cust-1", &request).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod admin;
mod auth;
mod cache;
mod catalog;
mod discounts;
mod http;
mod orders;
mod payments;
mod tax;

pub use admin::{DiscountInput, PendingCounts, ProductInput, ShipmentInput, TaxConfigInput};
pub use auth::{UserProfile, UserRole};
pub use catalog::{ProductPage, ProductQuery};
pub use http::{ApiClient, BackendConfig};
pub use orders::{CreateOrderRequest, OrderItemInput, OrderPage, PaymentVerification};
pub use payments::{GatewayField, GatewayForm};

use thiserror::Error;

/// Errors that can occur when talking to the PawCart backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Backend returned a non-success status with an error body.
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authentication failed and the token refresh did not recover it.
    #[error("Unauthorized")]
    Unauthorized,

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The request could not be constructed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Whether this error means the resource simply does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("/products/p-404".to_string());
        assert_eq!(err.to_string(), "Not found: /products/p-404");

        let err = ApiError::Backend {
            status: 422,
            message: "insufficient inventory".to_string(),
        };
        assert_eq!(err.to_string(), "Backend error (422): insufficient inventory");
    }

    #[test]
    fn test_rate_limited_display() {
        assert_eq!(
            ApiError::RateLimited(30).to_string(),
            "Rate limited, retry after 30 seconds"
        );
    }
}
