//! Low-level HTTP plumbing: auth token state, single-flight refresh, and
//! response decoding shared by all endpoint groups.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::ApiError;
use crate::cache::CacheValue;

/// Header carrying the acting customer's ID on customer-scoped calls.
pub(crate) const CUSTOMER_HEADER: &str = "x-customer-id";

/// Header authenticating the frontend service on token refresh calls.
const SERVICE_KEY_HEADER: &str = "x-service-key";

/// Catalog cache TTL.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Backend connection configuration.
///
/// Implements `Debug` manually to redact the service key.
#[derive(Clone)]
pub struct BackendConfig {
    /// Backend base URL, e.g. `https://api.pawcart.example`.
    pub base_url: String,
    /// Service key presented when refreshing the access token.
    pub service_key: SecretString,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url)
            .field("service_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Bearer token state.
///
/// The epoch counter lets a request that saw a 401 detect whether another
/// request already refreshed the token while it was waiting for the lock.
#[derive(Default)]
struct AuthState {
    token: Option<String>,
    epoch: u64,
}

/// Client for the PawCart REST backend.
///
/// Cheaply cloneable; all clones share the token state, the cookie jar that
/// holds the httpOnly refresh cookie, and the catalog cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: String,
    service_key: SecretString,
    auth: RwLock<AuthState>,
    /// Serializes refresh attempts so only one refresh call is in flight.
    refresh_lock: Mutex<()>,
    cache: Cache<String, CacheValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be constructed.
    pub fn new(config: &BackendConfig) -> Result<Self, ApiError> {
        url::Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid base_url: {e}")))?;

        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url: config.base_url.trim_end_matches('/').to_owned(),
                service_key: config.service_key.clone(),
                auth: RwLock::new(AuthState::default()),
                refresh_lock: Mutex::new(()),
                cache,
            }),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.inner.http.request(method, self.url(path))
    }

    pub(crate) fn cache(&self) -> &Cache<String, CacheValue> {
        &self.inner.cache
    }

    /// Drop all cached catalog responses.
    ///
    /// Called after admin product mutations so the storefront does not serve
    /// stale listings for the rest of the TTL.
    pub async fn invalidate_catalog(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }

    /// Execute a request, transparently refreshing the access token once on a
    /// 401 and replaying the original request.
    ///
    /// Concurrent requests that 401 while a refresh is already in flight queue
    /// behind the refresh lock, so only one refresh call reaches the backend;
    /// each waiter replays with the new token. If the refresh itself fails the
    /// token is cleared and the error propagates - single attempt, no backoff.
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let retry_builder = builder
            .try_clone()
            .ok_or_else(|| ApiError::InvalidRequest("request body is not replayable".to_owned()))?;

        let (token, epoch) = {
            let auth = self.inner.auth.read().await;
            (auth.token.clone(), auth.epoch)
        };

        let response = apply_bearer(builder, token.as_deref()).send().await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return check_status(response).await;
        }

        let fresh = self.refresh_token(epoch).await?;
        let response = apply_bearer(retry_builder, Some(&fresh)).send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        check_status(response).await
    }

    /// Execute a request and decode a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.execute(builder).await?;
        decode_json(response).await
    }

    /// Execute a credential-carrying request outside the refresh-and-replay
    /// wrapper and decode a JSON body.
    ///
    /// A 401 here means the submitted credentials are wrong; a service-token
    /// refresh cannot cure that, so none is attempted.
    pub(crate) async fn send_json_unauthenticated<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder.send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        decode_json(check_status(response).await?).await
    }

    /// Execute a request, discarding the response body.
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.execute(builder).await?;
        Ok(())
    }

    /// Refresh the access token, issuing at most one refresh call no matter
    /// how many requests observed the 401.
    ///
    /// `seen_epoch` is the token epoch the caller's failed request used. If
    /// the stored epoch has moved on by the time the lock is acquired, another
    /// request already refreshed and the current token is returned as-is.
    async fn refresh_token(&self, seen_epoch: u64) -> Result<String, ApiError> {
        let _guard = self.inner.refresh_lock.lock().await;

        {
            let auth = self.inner.auth.read().await;
            if auth.epoch != seen_epoch {
                debug!("Token already refreshed by a concurrent request");
                return auth.token.clone().ok_or(ApiError::Unauthorized);
            }
        }

        info!("Refreshing backend access token");
        let result = self
            .inner
            .http
            .post(self.url("/auth/refresh"))
            .header(SERVICE_KEY_HEADER, self.inner.service_key.expose_secret())
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                let body: TokenResponse = response.json().await?;
                let mut auth = self.inner.auth.write().await;
                auth.token = Some(body.access_token.clone());
                auth.epoch += 1;
                Ok(body.access_token)
            }
            Ok(response) => {
                warn!(status = %response.status(), "Token refresh rejected, clearing token");
                self.clear_token().await;
                Err(ApiError::Unauthorized)
            }
            Err(e) => {
                warn!(error = %e, "Token refresh request failed, clearing token");
                self.clear_token().await;
                Err(ApiError::Http(e))
            }
        }
    }

    async fn clear_token(&self) {
        let mut auth = self.inner.auth.write().await;
        auth.token = None;
        auth.epoch += 1;
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| {
        warn!(
            error = %e,
            body = %text.chars().take(500).collect::<String>(),
            "Failed to parse backend response"
        );
        ApiError::Parse(e)
    })
}

fn apply_bearer(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

/// Map non-success statuses to `ApiError`.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound(response.url().path().to_owned()));
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(1);
        return Err(ApiError::RateLimited(retry_after));
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => format!("HTTP {status}"),
    };
    Err(ApiError::Backend {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> BackendConfig {
        BackendConfig {
            base_url: "http://backend.test/".to_string(),
            service_key: SecretString::from("svc-key"),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new(&test_config()).expect("client");
        assert_eq!(client.url("/products"), "http://backend.test/products");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = BackendConfig {
            base_url: "not a url".to_string(),
            ..test_config()
        };
        assert!(matches!(
            ApiClient::new(&config),
            Err(ApiError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_config_debug_redacts_service_key() {
        let debug_output = format!("{:?}", test_config());
        assert!(debug_output.contains("http://backend.test/"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("svc-key"));
    }
}
