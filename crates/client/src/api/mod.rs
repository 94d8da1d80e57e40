//! HTTP gateway to the storefront API.
//!
//! # Architecture
//!
//! Every operation is a single attempt: no retries, no backoff, no timeout
//! override beyond the runtime's own. The server wraps every JSON response
//! in the same envelope, `{ success, data?, message? }`, and HTTP status
//! is not consulted; the envelope is the contract.
//!
//! Authenticated calls are gated before any network activity: with no
//! token held, they fail as [`ApiError::Unauthenticated`] without a
//! request ever being sent.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_client::{ApiClient, ClientConfig};
//!
//! let client = ApiClient::new(&ClientConfig::from_env()?)?;
//!
//! client.login("alice", &password).await?;
//! let profile = client.profile().await?;
//! ```

mod auth;
mod catalog;
mod profile;

pub use catalog::MIN_SEARCH_LENGTH;

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::SessionStore;

/// Fallback when the server reports failure without a message.
const GENERIC_FAILURE: &str = "request failed";

/// Whether a call must carry the session's bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Auth {
    None,
    Required,
}

/// The envelope every JSON response arrives in.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct ApiResponse<T> {
    success: bool,
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

/// Client for the storefront API.
///
/// Cheaply cloneable; clones share the HTTP connection pool and the
/// session store.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Create a client and restore any persisted session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be prepared or a
    /// persisted session entry cannot be read.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let session = SessionStore::new(&config.data_dir)?;
        session.restore()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http: reqwest::Client::new(),
                base_url: config.api_url.as_str().trim_end_matches('/').to_string(),
                session,
            }),
        })
    }

    /// The session store backing this client.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Check the API's health endpoint.
    ///
    /// The only call outside the JSON envelope: the body is plain text and
    /// passed through unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be read.
    pub async fn health(&self) -> Result<String, ApiError> {
        let response = self
            .inner
            .http
            .get(format!("{}/health", self.inner.base_url))
            .send()
            .await?;

        response
            .text()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Request plumbing
    // ─────────────────────────────────────────────────────────────────────────

    /// Issue one request and normalize the enveloped response.
    ///
    /// Returns the envelope's `data` payload, which legitimately may be
    /// absent for operations that return no data.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        auth: Auth,
    ) -> Result<Option<T>, ApiError> {
        let url = format!("{}{}", self.inner.base_url, path);
        let mut request = self.inner.http.request(method.clone(), &url);

        if auth == Auth::Required {
            let token = self
                .inner
                .session
                .token()
                .ok_or(ApiError::Unauthenticated)?;
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        if let Some(body) = &body {
            request = request.json(body);
        }

        tracing::debug!(%method, path, "sending API request");
        let response = request.send().await?;

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string()))?;

        if envelope.success {
            Ok(envelope.data)
        } else {
            let message = envelope
                .message
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            tracing::debug!(path, %message, "server reported failure");
            Err(ApiError::Server(message))
        }
    }

    /// Like [`Self::send`], for operations whose success payload is required.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        auth: Auth,
    ) -> Result<T, ApiError> {
        self.send(method, path, body, auth)
            .await?
            .ok_or_else(|| ApiError::Malformed("response missing data payload".to_string()))
    }

    /// Like [`Self::send`], for operations with no success payload.
    pub(crate) async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        auth: Auth,
    ) -> Result<(), ApiError> {
        self.send::<serde_json::Value>(method, path, body, auth)
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_success_with_data() {
        let envelope: ApiResponse<Vec<String>> =
            serde_json::from_str(r#"{"success":true,"data":["a","b"]}"#).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data.unwrap(), vec!["a", "b"]);
        assert_eq!(envelope.message, None);
    }

    #[test]
    fn test_envelope_failure_with_message() {
        let envelope: ApiResponse<Vec<String>> =
            serde_json::from_str(r#"{"success":false,"message":"Invalid password"}"#).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message.as_deref(), Some("Invalid password"));
    }

    #[test]
    fn test_envelope_success_without_data() {
        let envelope: ApiResponse<serde_json::Value> =
            serde_json::from_str(r#"{"success":true,"message":"User registered"}"#).unwrap();
        assert!(envelope.success);
        assert!(envelope.data.is_none());
    }
}
