//! Command implementations.
//!
//! Rendering only: each command invokes one client operation and prints
//! the outcome. Failures are reported here (server-supplied messages
//! verbatim, everything else as the command's fixed fallback line) and
//! then propagated as [`CommandFailed`] so `main` can set the exit code
//! without reporting twice.

pub mod auth;
pub mod catalog;
pub mod profile;

use shopfront_client::{ApiClient, ApiError, ErrorKind};

/// Marker error for failures already reported to the user.
#[derive(Debug, thiserror::Error)]
#[error("command failed")]
pub struct CommandFailed;

/// Print the user-facing line for a failed operation.
pub(crate) fn report_failure(err: &ApiError, fallback: &str) -> CommandFailed {
    let message = match err.kind() {
        ErrorKind::Unauthenticated => "Please login first.",
        _ => err.user_message(fallback),
    };
    eprintln!("{message}");
    CommandFailed
}

/// Check that the API is reachable.
pub async fn health(client: &ApiClient) -> Result<(), CommandFailed> {
    match client.health().await {
        Ok(body) => {
            println!("{}", body.trim());
            Ok(())
        }
        Err(err) => Err(report_failure(&err, "Health check failed.")),
    }
}
