//! Login, registration, and logout commands.

use secrecy::SecretString;
use shopfront_client::ApiClient;
use shopfront_core::{Email, Username};

use super::{CommandFailed, report_failure};

/// Log in and store the session.
pub async fn login(
    client: &ApiClient,
    username: &str,
    password: SecretString,
) -> Result<(), CommandFailed> {
    match client.login(username, &password).await {
        Ok(user) => {
            println!("Login successful! Welcome, {}.", user.username);
            Ok(())
        }
        Err(err) => Err(report_failure(&err, "Login failed. Please try again.")),
    }
}

/// Create a new account.
pub async fn register(
    client: &ApiClient,
    username: &Username,
    password: SecretString,
    email: &Email,
) -> Result<(), CommandFailed> {
    match client.register(username, &password, email).await {
        Ok(()) => {
            println!("Registration successful! Please login.");
            Ok(())
        }
        Err(err) => Err(report_failure(
            &err,
            "Registration failed. Please try again.",
        )),
    }
}

/// Log out and clear the stored session.
pub async fn logout(client: &ApiClient) -> Result<(), CommandFailed> {
    match client.logout().await {
        Ok(()) => {
            println!("Logged out successfully");
            Ok(())
        }
        Err(err) => Err(report_failure(&err, "Logout failed.")),
    }
}
