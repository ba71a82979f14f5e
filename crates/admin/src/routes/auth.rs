//! Admin authentication route handlers.
//!
//! Credentials are verified by the backend; only accounts with the admin
//! role may establish a session here.

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

use pawcart_client::{ApiError, UserRole};

use crate::filters;
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Display the login page.
#[instrument]
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate { error: None }
}

/// Verify credentials and establish the admin session.
///
/// A valid customer account is rejected here exactly like a bad password;
/// the login page never reveals which check failed.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let profile = match state.api().login(&form.email, &form.password).await {
        Ok(profile) if profile.role == UserRole::Admin => profile,
        Ok(_) | Err(ApiError::Unauthorized) => {
            return LoginTemplate {
                error: Some("Invalid credentials".to_string()),
            }
            .into_response();
        }
        Err(e) => {
            tracing::error!("Admin login failed: {e}");
            return LoginTemplate {
                error: Some("Could not reach the backend. Try again.".to_string()),
            }
            .into_response();
        }
    };

    let admin = CurrentAdmin {
        id: profile.id,
        name: profile.name,
        email: profile.email,
    };
    if let Err(e) = set_current_admin(&session, &admin).await {
        tracing::error!("Failed to store admin session: {e}");
        return LoginTemplate {
            error: Some("Session error. Try again.".to_string()),
        }
        .into_response();
    }

    tracing::info!(admin_id = %admin.id, "Admin logged in");
    Redirect::to("/").into_response()
}

/// End the admin session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_admin(&session).await {
        tracing::error!("Failed to clear admin session: {e}");
    }
    Redirect::to("/auth/login").into_response()
}
