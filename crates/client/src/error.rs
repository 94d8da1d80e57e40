//! Error taxonomy for API operations.
//!
//! Every operation returns `Result<T, ApiError>`. The variants map onto
//! the failure categories of the wire contract (transport failure,
//! malformed response, server-reported failure, missing-session
//! precondition) plus local session storage. Callers branch on
//! [`ApiError::kind`] rather than message text.

use thiserror::Error;

use crate::session::SessionError;

/// An API operation failure.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS,
    /// timeout, broken pipe).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response was not the expected JSON envelope.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The server answered `success: false`; the message is the server's,
    /// verbatim.
    #[error("{0}")]
    Server(String),

    /// The operation requires a session and none is held. Raised before
    /// any network activity.
    #[error("not logged in")]
    Unauthenticated,

    /// Persisting or clearing the local session failed.
    #[error("session storage error: {0}")]
    Storage(#[from] SessionError),
}

/// Discriminant of [`ApiError`], for tests and user-facing dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Transport,
    Malformed,
    Server,
    Unauthenticated,
    Storage,
}

impl ApiError {
    /// The failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::Malformed(_) => ErrorKind::Malformed,
            Self::Server(_) => ErrorKind::Server,
            Self::Unauthenticated => ErrorKind::Unauthenticated,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    /// The message to show a user.
    ///
    /// Server-reported failures surface their message verbatim; every other
    /// kind collapses to the caller's fixed `fallback`, so transport and
    /// malformed-response failures are indistinguishable to the user.
    #[must_use]
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            Self::Server(message) => message,
            _ => fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            ApiError::Malformed("bad".to_string()).kind(),
            ErrorKind::Malformed
        );
        assert_eq!(
            ApiError::Server("Invalid password".to_string()).kind(),
            ErrorKind::Server
        );
        assert_eq!(ApiError::Unauthenticated.kind(), ErrorKind::Unauthenticated);
    }

    #[test]
    fn test_user_message_server_verbatim() {
        let err = ApiError::Server("Invalid password".to_string());
        assert_eq!(
            err.user_message("Login failed. Please try again."),
            "Invalid password"
        );
    }

    #[test]
    fn test_user_message_other_kinds_use_fallback() {
        let err = ApiError::Malformed("expected value at line 1".to_string());
        assert_eq!(
            err.user_message("Login failed. Please try again."),
            "Login failed. Please try again."
        );

        let err = ApiError::Unauthenticated;
        assert_eq!(err.user_message("Failed to load profile"), "Failed to load profile");
    }

    #[test]
    fn test_display_server_message_is_bare() {
        let err = ApiError::Server("User exists".to_string());
        assert_eq!(err.to_string(), "User exists");
    }
}
