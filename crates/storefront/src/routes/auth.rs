//! Customer authentication route handlers.
//!
//! Credentials are forwarded to the backend for verification; the
//! returned profile is cached in the session as the login state.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use pawcart_client::ApiError;

use crate::error::AppError;
use crate::filters;
use crate::middleware::{clear_current_customer, set_current_customer};
use crate::models::CurrentCustomer;
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub next: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginParams {
    pub next: Option<String>,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub next: Option<String>,
}

/// Only same-site relative paths are valid post-login targets.
fn safe_next(next: Option<String>) -> String {
    next.filter(|n| n.starts_with('/') && !n.starts_with("//"))
        .unwrap_or_else(|| "/".to_string())
}

/// Display the login page.
#[instrument]
pub async fn login_page(Query(params): Query<LoginParams>) -> impl IntoResponse {
    LoginTemplate {
        error: None,
        next: safe_next(params.next),
    }
}

/// Verify credentials and establish the session.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let next = safe_next(form.next);

    let profile = match state.api().login(&form.email, &form.password).await {
        Ok(profile) => profile,
        Err(ApiError::Unauthorized) => {
            return Ok(LoginTemplate {
                error: Some("Invalid email or password".to_string()),
                next,
            }
            .into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let customer = CurrentCustomer {
        id: profile.id,
        name: profile.name,
        email: profile.email,
    };
    set_current_customer(&session, &customer)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(customer_id = %customer.id, "Customer logged in");
    Ok(Redirect::to(&next).into_response())
}

/// End the session.
#[instrument(skip(state, session))]
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<Response, AppError> {
    if let Ok(Some(customer)) = session
        .get::<CurrentCustomer>(crate::models::session_keys::CURRENT_CUSTOMER)
        .await
    {
        if let Err(e) = state.api().logout(&customer.id).await {
            tracing::warn!("Backend logout failed: {e}");
        }
    }

    clear_current_customer(&session)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Redirect::to("/").into_response())
}

#[cfg(test)]
mod tests {
    use super::safe_next;

    #[test]
    fn test_safe_next_rejects_external_targets() {
        assert_eq!(safe_next(Some("/checkout".to_string())), "/checkout");
        assert_eq!(safe_next(Some("//evil.example".to_string())), "/");
        assert_eq!(safe_next(Some("https://evil.example".to_string())), "/");
        assert_eq!(safe_next(None), "/");
    }
}
