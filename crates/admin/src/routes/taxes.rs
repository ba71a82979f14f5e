//! Tax settings route handlers.

use askama::Template;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use pawcart_client::TaxConfigInput;

use crate::{filters, middleware::RequireAdminAuth, state::AppState};

/// Tax settings page template.
#[derive(Template)]
#[template(path = "taxes/show.html")]
pub struct TaxesTemplate {
    pub name: String,
    pub rate: f64,
    pub inclusive: bool,
    pub active: bool,
}

/// Tax settings form data.
#[derive(Debug, Deserialize)]
pub struct TaxForm {
    pub name: String,
    pub rate: f64,
    pub inclusive: Option<String>,
    pub active: Option<String>,
}

/// Tax settings page handler.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Html<String> {
    let template = match state.api().admin_tax_config().await {
        Ok(Some(config)) => TaxesTemplate {
            name: config.name,
            rate: config.rate,
            inclusive: config.inclusive,
            active: config.active,
        },
        Ok(None) => TaxesTemplate {
            name: "GST".to_string(),
            rate: 0.0,
            inclusive: false,
            active: false,
        },
        Err(e) => {
            tracing::error!("Failed to fetch tax config: {e}");
            TaxesTemplate {
                name: String::new(),
                rate: 0.0,
                inclusive: false,
                active: false,
            }
        }
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

/// Replace the tax settings.
#[instrument(skip(_admin, state, form))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<TaxForm>,
) -> Response {
    if !(0.0..=100.0).contains(&form.rate) {
        return (StatusCode::BAD_REQUEST, "Rate must be between 0 and 100").into_response();
    }

    let input = TaxConfigInput {
        name: form.name.trim().to_string(),
        rate: form.rate,
        inclusive: form.inclusive.is_some(),
        active: form.active.is_some(),
    };

    match state.api().admin_update_tax_config(&input).await {
        Ok(config) => {
            tracing::info!(name = %config.name, rate = config.rate, "Tax config updated");
            Redirect::to("/taxes").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to update tax config: {e}");
            (StatusCode::BAD_REQUEST, format!("Update failed: {e}")).into_response()
        }
    }
}
