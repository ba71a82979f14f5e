//! Shared fixtures for the black-box client tests under `tests/`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::time::Duration;

use pawcart_client::{ApiClient, BackendConfig};
use secrecy::SecretString;

/// Service key every test client presents on token refresh.
pub const SERVICE_KEY: &str = "test-service-key";

/// Build a client pointed at a mock server with a short timeout.
///
/// # Panics
///
/// Panics if the client cannot be constructed; test-only code.
#[must_use]
pub fn test_client(base_url: &str) -> ApiClient {
    let config = BackendConfig {
        base_url: base_url.to_string(),
        service_key: SecretString::from(SERVICE_KEY),
        timeout: Duration::from_secs(2),
    };
    ApiClient::new(&config).expect("test client should build")
}
