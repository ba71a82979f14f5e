//! Discount endpoints.

use chrono::{DateTime, Utc};
use reqwest::Method;
use tracing::instrument;

use pawcart_core::Discount;

use crate::http::ApiClient;
use crate::ApiError;

/// Keep only discounts that are switched on and inside their validity window.
///
/// A discount whose `ends_at` is in the past is excluded regardless of its
/// `active` flag.
#[must_use]
pub(crate) fn filter_live(discounts: Vec<Discount>, now: DateTime<Utc>) -> Vec<Discount> {
    discounts
        .into_iter()
        .filter(|discount| discount.active && discount.is_live(now))
        .collect()
}

impl ApiClient {
    /// List all published discount codes.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_discounts(&self) -> Result<Vec<Discount>, ApiError> {
        self.send_json(self.request(Method::GET, "/discounts")).await
    }

    /// List discounts currently redeemable, for the storefront offers strip.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn live_discounts(&self) -> Result<Vec<Discount>, ApiError> {
        let discounts = self.list_discounts().await?;
        Ok(filter_live(discounts, Utc::now()))
    }

    /// Look up one live discount by code, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn find_live_discount(&self, code: &str) -> Result<Option<Discount>, ApiError> {
        let discounts = self.live_discounts().await?;
        Ok(discounts
            .into_iter()
            .find(|discount| discount.code.eq_ignore_ascii_case(code)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pawcart_core::{DiscountId, DiscountType};

    fn discount(code: &str, active: bool, ends_at: Option<DateTime<Utc>>) -> Discount {
        Discount {
            id: DiscountId::new(format!("d-{code}")),
            code: code.to_string(),
            discount_type: DiscountType::Percentage,
            value: 10,
            starts_at: None,
            ends_at,
            usage_limit: None,
            usage_count: 0,
            min_order_value: None,
            max_discount_amount: None,
            first_time_only: false,
            active,
        }
    }

    #[test]
    fn test_expired_excluded_regardless_of_active_flag() {
        let now = Utc::now();
        let discounts = vec![
            discount("LIVE", true, Some(now + Duration::days(1))),
            discount("EXPIRED", true, Some(now - Duration::hours(1))),
            discount("DISABLED", false, Some(now + Duration::days(1))),
        ];

        let live = filter_live(discounts, now);
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].code, "LIVE");
    }

    #[test]
    fn test_no_end_date_is_live() {
        let live = filter_live(vec![discount("OPEN", true, None)], Utc::now());
        assert_eq!(live.len(), 1);
    }
}
