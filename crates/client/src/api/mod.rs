//! HTTP client for the Thimble backend API.
//!
//! All endpoints speak JSON over HTTP and wrap their payload in a
//! `{ success, message?, ... }` envelope. Failures are classified into
//! [`ApiError`] once, here, so that the layers above (cart reconciliation,
//! session) can express their recovery policy in terms of error class rather
//! than status codes.
//!
//! The bearer credential is shared through a [`TokenCell`]: the session
//! manager writes it, every request reads it. An expired or missing token
//! surfaces as [`ApiError::AuthExpired`] and is handled like any other
//! remote failure by the caller - no mode transition happens down here.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod orders;

use std::sync::{Arc, RwLock};

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use crate::config::ClientConfig;

pub use auth::{AuthApi, NewAccount, User, UserRole};
pub use cart::CartApi;
pub use catalog::{CatalogApi, Category};
pub use orders::OrdersApi;

// =============================================================================
// Errors
// =============================================================================

/// Classified failure of a backend API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend could not be reached or the transport failed mid-flight.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The bearer credential is missing, invalid, or expired.
    #[error("authentication expired")]
    AuthExpired,

    /// The backend rejected the request as invalid (e.g., stock exceeded).
    /// Carries the server's human-readable message.
    #[error("{0}")]
    Rejected(String),

    /// The backend failed internally.
    #[error("server error: {0}")]
    Server(String),

    /// The response body was not the JSON shape we expect.
    #[error("invalid response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Check an envelope's success flag, converting a polite refusal into
/// [`ApiError::Rejected`].
pub(crate) fn ensure_success(success: bool, message: Option<String>) -> Result<(), ApiError> {
    if success {
        Ok(())
    } else {
        Err(ApiError::Rejected(
            message.unwrap_or_else(|| "request rejected by server".to_owned()),
        ))
    }
}

// =============================================================================
// Token Cell
// =============================================================================

/// Shared cell holding the session's bearer token.
///
/// Cheaply cloneable; the session manager and the API client hold handles to
/// the same cell.
#[derive(Clone, Default)]
pub struct TokenCell {
    inner: Arc<RwLock<Option<SecretString>>>,
}

impl TokenCell {
    /// Create an empty cell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new token, replacing any previous one.
    pub fn set(&self, token: SecretString) {
        if let Ok(mut slot) = self.inner.write() {
            *slot = Some(token);
        }
    }

    /// Drop the stored token.
    pub fn clear(&self) {
        if let Ok(mut slot) = self.inner.write() {
            *slot = None;
        }
    }

    /// Whether a token is currently stored.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.inner.read().is_ok_and(|slot| slot.is_some())
    }

    /// The `Authorization` header value, if a token is stored.
    fn bearer(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|slot| {
                slot.as_ref()
                    .map(|token| format!("Bearer {}", token.expose_secret()))
            })
    }
}

impl std::fmt::Debug for TokenCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCell")
            .field("set", &self.is_set())
            .finish()
    }
}

// =============================================================================
// ApiClient
// =============================================================================

/// Transport core shared by all endpoint surfaces.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

#[derive(Debug)]
struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
    token: TokenCell,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.api_url.as_str().trim_end_matches('/').to_owned(),
                token: TokenCell::new(),
            }),
        })
    }

    /// Handle to the shared token cell.
    #[must_use]
    pub fn token(&self) -> TokenCell {
        self.inner.token.clone()
    }

    /// Cart endpoint surface.
    #[must_use]
    pub fn cart(&self) -> CartApi {
        CartApi::new(self.clone())
    }

    /// Auth endpoint surface.
    #[must_use]
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    /// Orders endpoint surface.
    #[must_use]
    pub fn orders(&self) -> OrdersApi {
        OrdersApi::new(self.clone())
    }

    /// Catalog endpoint surface.
    ///
    /// Each call builds a surface with a fresh cache; construct once and
    /// reuse it to get cache hits.
    #[must_use]
    pub fn catalog(&self) -> CatalogApi {
        CatalogApi::new(self.clone())
    }

    /// Execute a request and decode the JSON response.
    #[instrument(skip(self, body), fields(method = %method, path = %path))]
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&(impl Serialize + Sync)>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.inner.base_url);

        let mut request = self.inner.http.request(method, &url);
        if let Some(bearer) = self.inner.token.bearer() {
            request = request.header(reqwest::header::AUTHORIZATION, bearer);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        // Read the body as text first for better error diagnostics.
        let text = response.text().await?;

        if let Some(e) = classify_status(status, &text) {
            match &e {
                ApiError::AuthExpired => {
                    tracing::debug!(status = %status, "request failed authentication");
                }
                ApiError::Server(_) => {
                    tracing::error!(
                        status = %status,
                        body = %text.chars().take(500).collect::<String>(),
                        "backend returned server error"
                    );
                }
                _ => {}
            }
            return Err(e);
        }

        // Some endpoints answer a bare 2xx with no body; treat that as a
        // plain success envelope.
        if text.trim().is_empty() {
            return Ok(serde_json::from_str(r#"{"success":true}"#)?);
        }

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %text.chars().take(500).collect::<String>(),
                    "failed to parse backend response"
                );
                Err(ApiError::Parse(e))
            }
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, None::<&()>).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, ApiError> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, ApiError> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, None::<&()>).await
    }
}

/// Map a non-success HTTP status to its [`ApiError`] class.
///
/// `None` means the status is not an error. The 401/403 mapping to
/// [`ApiError::AuthExpired`] is what lets the session layer tell a stale
/// token apart from an unreachable backend.
fn classify_status(status: StatusCode, body: &str) -> Option<ApiError> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Some(ApiError::AuthExpired);
    }
    if status.is_client_error() {
        return Some(ApiError::Rejected(extract_message(body, status)));
    }
    if status.is_server_error() {
        return Some(ApiError::Server(extract_message(body, status)));
    }
    None
}

/// Pull a human-readable message out of an error body, falling back to the
/// HTTP status line.
fn extract_message(text: &str, status: StatusCode) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        error: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(text)
        .ok()
        .and_then(|body| body.message.or(body.error))
        .unwrap_or_else(|| format!("HTTP {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_cell_round_trip() {
        let cell = TokenCell::new();
        assert!(!cell.is_set());
        cell.set(SecretString::from("abc123"));
        assert!(cell.is_set());
        assert_eq!(cell.bearer().as_deref(), Some("Bearer abc123"));
        cell.clear();
        assert!(cell.bearer().is_none());
    }

    #[test]
    fn test_token_cell_debug_redacts() {
        let cell = TokenCell::new();
        cell.set(SecretString::from("super-secret"));
        let debug = format!("{cell:?}");
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_extract_message_prefers_body_message() {
        let text = r#"{"success":false,"message":"Not enough stock"}"#;
        assert_eq!(
            extract_message(text, StatusCode::BAD_REQUEST),
            "Not enough stock"
        );
    }

    #[test]
    fn test_extract_message_falls_back_to_status() {
        assert_eq!(
            extract_message("<html>oops</html>", StatusCode::BAD_GATEWAY),
            "HTTP 502 Bad Gateway"
        );
    }

    #[test]
    fn test_classify_401_and_403_as_expired_auth() {
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, ""),
            Some(ApiError::AuthExpired)
        ));
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN, ""),
            Some(ApiError::AuthExpired)
        ));
    }

    #[test]
    fn test_classify_client_error_as_rejected_with_message() {
        let body = r#"{"success":false,"message":"Not enough stock"}"#;
        let err = classify_status(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, Some(ApiError::Rejected(msg)) if msg == "Not enough stock"));
    }

    #[test]
    fn test_classify_server_error() {
        let err = classify_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert!(matches!(err, Some(ApiError::Server(_))));
    }

    #[test]
    fn test_classify_success_statuses_pass_through() {
        assert!(classify_status(StatusCode::OK, "").is_none());
        assert!(classify_status(StatusCode::NO_CONTENT, "").is_none());
    }

    #[test]
    fn test_client_exposes_every_endpoint_surface() {
        let config = crate::config::ClientConfig {
            api_url: url::Url::parse("http://localhost:9/api").expect("valid url"),
            data_dir: std::path::PathBuf::from(".thimble"),
            http_timeout: std::time::Duration::from_secs(1),
        };
        let client = ApiClient::new(&config).expect("client");
        let _ = (
            client.cart(),
            client.auth(),
            client.orders(),
            client.catalog(),
        );
    }

    #[test]
    fn test_ensure_success_converts_refusal() {
        assert!(ensure_success(true, None).is_ok());
        let err = ensure_success(false, Some("no".to_owned())).expect_err("rejected");
        assert!(matches!(err, ApiError::Rejected(msg) if msg == "no"));
    }
}
