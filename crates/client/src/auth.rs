//! Authentication endpoints.
//!
//! Credential checking and session issuance live in the backend; the frontend
//! only forwards credentials and stores the returned profile in its own
//! session.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::http::{ApiClient, CUSTOMER_HEADER};
use crate::ApiError;

/// Role attached to a backend user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Customer,
    Admin,
}

/// Profile returned on a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Verify credentials against the backend.
    ///
    /// Sent outside the token refresh path: a 401 from this endpoint means
    /// the credentials themselves are wrong.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` for bad credentials, or another error
    /// if the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ApiError> {
        self.send_json_unauthenticated(
            self.request(Method::POST, "/auth/login")
                .json(&LoginRequest { email, password }),
        )
        .await
    }

    /// Tell the backend the user's session ended.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn logout(&self, user_id: &str) -> Result<(), ApiError> {
        self.send_empty(
            self.request(Method::POST, "/auth/logout")
                .header(CUSTOMER_HEADER, user_id),
        )
        .await
    }
}
