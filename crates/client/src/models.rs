//! Session and profile records.
//!
//! Types held by the session store and returned by profile calls.

use serde::{Deserialize, Serialize};

/// Session-stored user identity.
///
/// Minimal data persisted alongside the token to identify the logged-in
/// user between runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentUser {
    /// The username the session was established for.
    pub username: String,
}

/// An authenticated session.
///
/// Exists only while both the token and the user record are available; a
/// partial pair on disk is treated as logged out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque bearer token issued by the server at login.
    pub token: String,
    /// Identity the token was issued for.
    pub user: CurrentUser,
}

/// Account profile as served by `GET /profile`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// Account username.
    pub username: String,
    /// Contact email, if one was provided at registration.
    #[serde(default)]
    pub email: Option<String>,
    /// Whether the account is active.
    #[serde(default)]
    pub active: bool,
}
