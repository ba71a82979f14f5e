//! Tax configuration endpoint.

use reqwest::Method;
use tracing::instrument;

use pawcart_core::TaxConfig;

use crate::http::ApiClient;
use crate::ApiError;

impl ApiClient {
    /// Fetch the active tax configuration, if one is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails. A 404 means no tax is
    /// configured and maps to `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn active_tax(&self) -> Result<Option<TaxConfig>, ApiError> {
        match self
            .send_json::<TaxConfig>(self.request(Method::GET, "/taxes/active"))
            .await
        {
            Ok(config) => Ok(Some(config)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
