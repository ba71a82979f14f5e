//! Custom Askama template filters for the admin panel.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats an RFC 3339 timestamp with date and time.
///
/// Usage in templates: `{{ order.created_at|date_time }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn date_time(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let raw = value.to_string();
    Ok(chrono::DateTime::parse_from_rfc3339(&raw)
        .map_or(raw, |dt| dt.format("%d %b %Y %H:%M").to_string()))
}
