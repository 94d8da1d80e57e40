//! Profile view, update, and deletion. All require an active session.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use super::{ApiClient, Auth};
use crate::error::ApiError;
use crate::models::Profile;

impl ApiClient {
    /// Fetch the current account's profile.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] without a network call when no
    /// session is held; otherwise errors if the request fails or the server
    /// reports failure.
    pub async fn profile(&self) -> Result<Profile, ApiError> {
        self.fetch(Method::GET, "/profile", None, Auth::Required)
            .await
    }

    /// Change the account password.
    ///
    /// No password policy is enforced here; acceptability is entirely the
    /// server's call, surfaced through its success/failure response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] without a network call when no
    /// session is held; otherwise errors if the request fails or the server
    /// rejects the new password.
    pub async fn update_profile(&self, new_password: &SecretString) -> Result<(), ApiError> {
        let body = json!({ "password": new_password.expose_secret() });
        self.execute(Method::PUT, "/profile", Some(body), Auth::Required)
            .await
    }

    /// Delete the account.
    ///
    /// On success the account no longer exists server-side, so the logout
    /// flow runs immediately: best-effort server notification, then an
    /// unconditional local session clear.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] without a network call when no
    /// session is held; otherwise errors if the request fails, the server
    /// reports failure, or the local session cannot be cleared.
    pub async fn delete_profile(&self) -> Result<(), ApiError> {
        self.execute(Method::DELETE, "/profile", None, Auth::Required)
            .await?;
        self.logout().await
    }
}
