//! Login, registration, and logout.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use shopfront_core::{Email, Username};

use super::{ApiClient, Auth};
use crate::error::ApiError;
use crate::models::CurrentUser;

/// Success payload of `POST /login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginData {
    session_token: String,
    username: String,
}

impl ApiClient {
    /// Log in and establish a session.
    ///
    /// The username is passed through as typed; the server decides
    /// credential validity. On success the returned token and username are
    /// persisted and carried on subsequent authenticated calls.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server rejects the
    /// credentials, or the session cannot be persisted.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<CurrentUser, ApiError> {
        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });

        let data: LoginData = self
            .fetch(Method::POST, "/login", Some(body), Auth::None)
            .await?;

        let user = CurrentUser {
            username: data.username,
        };
        self.session().establish(data.session_token, user.clone())?;

        tracing::debug!(username = %user.username, "session established");
        Ok(user)
    }

    /// Register a new account.
    ///
    /// No session side effect; callers are expected to log in afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the
    /// registration (e.g. the username is taken).
    pub async fn register(
        &self,
        username: &Username,
        password: &SecretString,
        email: &Email,
    ) -> Result<(), ApiError> {
        let body = json!({
            "username": username.as_str(),
            "password": password.expose_secret(),
            "email": email.as_str(),
        });

        self.execute(Method::POST, "/register", Some(body), Auth::None)
            .await
    }

    /// Log out.
    ///
    /// The server is notified best-effort when a token is held: a failed
    /// notification is logged and swallowed. The local session is cleared
    /// regardless of the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error only if clearing the persisted session fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        if self.session().is_authenticated() {
            if let Err(err) = self
                .execute(Method::POST, "/logout", None, Auth::Required)
                .await
            {
                tracing::warn!(error = %err, "server-side logout failed; clearing local session anyway");
            }
        }

        self.session().clear()?;
        Ok(())
    }
}
