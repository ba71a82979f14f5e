//! Discount management route handlers.

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use pawcart_client::DiscountInput;
use pawcart_core::{Discount, DiscountId, DiscountType, Price};

use crate::{filters, middleware::RequireAdminAuth, state::AppState};

/// Discount view for the listing.
#[derive(Debug, Clone)]
pub struct DiscountView {
    pub id: String,
    pub code: String,
    pub summary: String,
    pub window: String,
    pub usage: String,
    pub active: bool,
    pub live: bool,
}

impl From<&Discount> for DiscountView {
    fn from(discount: &Discount) -> Self {
        let window = match (discount.starts_at, discount.ends_at) {
            (Some(start), Some(end)) => {
                format!("{} to {}", start.format("%d %b %Y"), end.format("%d %b %Y"))
            }
            (None, Some(end)) => format!("until {}", end.format("%d %b %Y")),
            (Some(start), None) => format!("from {}", start.format("%d %b %Y")),
            (None, None) => "always".to_string(),
        };
        let usage = match discount.usage_limit {
            Some(limit) => format!("{} / {limit}", discount.usage_count),
            None => discount.usage_count.to_string(),
        };

        Self {
            id: discount.id.to_string(),
            code: discount.code.clone(),
            summary: discount.describe(),
            window,
            usage,
            active: discount.active,
            live: discount.active && discount.is_live(Utc::now()),
        }
    }
}

/// Discount form data. Fixed values and money bounds are entered in rupees.
#[derive(Debug, Deserialize)]
pub struct DiscountForm {
    pub code: String,
    #[serde(rename = "type")]
    pub discount_type: String,
    pub value: f64,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
    pub usage_limit: Option<u32>,
    pub min_order_value: Option<f64>,
    pub max_discount_amount: Option<f64>,
    pub first_time_only: Option<String>,
}

impl DiscountForm {
    fn into_input(self) -> Result<DiscountInput, String> {
        let discount_type = match self.discount_type.as_str() {
            "percentage" => DiscountType::Percentage,
            "fixed" => DiscountType::Fixed,
            other => return Err(format!("Unknown discount type: {other}")),
        };

        #[allow(clippy::cast_possible_truncation)]
        let value = match discount_type {
            DiscountType::Percentage => self.value.round() as i64,
            DiscountType::Fixed => Price::from_rupees(self.value).as_paise(),
        };

        Ok(DiscountInput {
            code: self.code.trim().to_uppercase(),
            discount_type,
            value,
            starts_at: parse_date(self.starts_at)?,
            ends_at: parse_date(self.ends_at)?,
            usage_limit: self.usage_limit.filter(|l| *l > 0),
            min_order_value: self
                .min_order_value
                .filter(|v| *v > 0.0)
                .map(Price::from_rupees),
            max_discount_amount: self
                .max_discount_amount
                .filter(|v| *v > 0.0)
                .map(Price::from_rupees),
            first_time_only: self.first_time_only.is_some(),
        })
    }
}

/// Parse an optional `datetime-local` form value.
fn parse_date(value: Option<String>) -> Result<Option<DateTime<Utc>>, String> {
    let Some(raw) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    chrono::NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M")
        .map(|naive| Some(naive.and_utc()))
        .map_err(|e| format!("Invalid date '{raw}': {e}"))
}

/// Discount list page template.
#[derive(Template)]
#[template(path = "discounts/index.html")]
pub struct DiscountsIndexTemplate {
    pub discounts: Vec<DiscountView>,
}

/// Discount form page template, shared by create and edit.
#[derive(Template)]
#[template(path = "discounts/form.html")]
pub struct DiscountFormTemplate {
    pub heading: String,
    pub action: String,
    pub code: String,
}

fn render<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

/// Discount list page handler. Shows everything, including expired and
/// switched-off codes, with a live marker on the currently redeemable ones.
#[instrument(skip(_admin, state))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Html<String> {
    let discounts = match state.api().admin_list_discounts().await {
        Ok(discounts) => discounts.iter().map(DiscountView::from).collect(),
        Err(e) => {
            tracing::error!("Failed to fetch discounts: {e}");
            vec![]
        }
    };

    render(&DiscountsIndexTemplate { discounts })
}

/// New discount form.
#[instrument(skip(_admin))]
pub async fn new_form(RequireAdminAuth(_admin): RequireAdminAuth) -> Html<String> {
    render(&DiscountFormTemplate {
        heading: "New discount".to_string(),
        action: "/discounts".to_string(),
        code: String::new(),
    })
}

/// Edit discount form.
///
/// The backend does not expose a single-discount read, so the current code
/// is resolved from the listing.
#[instrument(skip(_admin, state))]
pub async fn edit_form(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let code = match state.api().admin_list_discounts().await {
        Ok(discounts) => discounts
            .into_iter()
            .find(|d| d.id.as_str() == id)
            .map(|d| d.code),
        Err(e) => {
            tracing::error!("Failed to fetch discounts: {e}");
            None
        }
    };

    let Some(code) = code else {
        return (StatusCode::NOT_FOUND, "Discount not found").into_response();
    };

    render(&DiscountFormTemplate {
        heading: format!("Edit {code}"),
        action: format!("/discounts/{id}"),
        code,
    })
    .into_response()
}

/// Create a discount.
#[instrument(skip(_admin, state, form))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<DiscountForm>,
) -> Response {
    let input = match form.into_input() {
        Ok(input) => input,
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };

    match state.api().admin_create_discount(&input).await {
        Ok(discount) => {
            tracing::info!(discount_id = %discount.id, code = %discount.code, "Discount created");
            Redirect::to("/discounts").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create discount: {e}");
            (StatusCode::BAD_REQUEST, format!("Create failed: {e}")).into_response()
        }
    }
}

/// Update a discount.
#[instrument(skip(_admin, state, form))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DiscountForm>,
) -> Response {
    let input = match form.into_input() {
        Ok(input) => input,
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };

    match state
        .api()
        .admin_update_discount(&DiscountId::new(id), &input)
        .await
    {
        Ok(discount) => {
            tracing::info!(discount_id = %discount.id, "Discount updated");
            Redirect::to("/discounts").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to update discount: {e}");
            (StatusCode::BAD_REQUEST, format!("Update failed: {e}")).into_response()
        }
    }
}

/// Switch a discount off without deleting it.
#[instrument(skip(_admin, state))]
pub async fn deactivate(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state
        .api()
        .admin_deactivate_discount(&DiscountId::new(id))
        .await
    {
        Ok(()) => Redirect::to("/discounts").into_response(),
        Err(e) => {
            tracing::error!("Failed to deactivate discount: {e}");
            (StatusCode::BAD_REQUEST, format!("Deactivate failed: {e}")).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_accepts_datetime_local() {
        let parsed = parse_date(Some("2026-09-01T00:00".to_string())).expect("parse");
        assert!(parsed.is_some());
        assert!(parse_date(Some(String::new())).expect("parse").is_none());
        assert!(parse_date(None).expect("parse").is_none());
        assert!(parse_date(Some("not-a-date".to_string())).is_err());
    }

    #[test]
    fn test_fixed_value_converted_to_paise() {
        let form = DiscountForm {
            code: "flat50".to_string(),
            discount_type: "fixed".to_string(),
            value: 50.0,
            starts_at: None,
            ends_at: None,
            usage_limit: None,
            min_order_value: None,
            max_discount_amount: None,
            first_time_only: None,
        };
        let input = form.into_input().expect("convert");
        assert_eq!(input.code, "FLAT50");
        assert_eq!(input.value, 5000);
    }
}
