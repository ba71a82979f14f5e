//! Custom Askama template filters.

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

/// Formats an RFC 3339 timestamp as a human-readable date.
///
/// Falls back to the raw input when the value does not parse.
///
/// Usage in templates: `{{ order.created_at|short_date }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn short_date(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let raw = value.to_string();
    Ok(chrono::DateTime::parse_from_rfc3339(&raw)
        .map_or(raw, |dt| dt.format("%d %b %Y").to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    #[test]
    fn test_short_date_parses_rfc3339() {
        let parsed = chrono::DateTime::parse_from_rfc3339("2026-03-15T10:30:00Z")
            .map(|dt| dt.format("%d %b %Y").to_string())
            .unwrap_or_default();
        assert_eq!(parsed, "15 Mar 2026");
    }

    #[test]
    fn test_current_year_is_recent() {
        assert!(chrono::Utc::now().year() >= 2026);
    }
}
