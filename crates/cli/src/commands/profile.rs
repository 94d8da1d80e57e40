//! Profile commands. All require a stored session.

use secrecy::SecretString;
use shopfront_client::ApiClient;

use super::{CommandFailed, report_failure};

/// Show the account profile.
pub async fn show(client: &ApiClient) -> Result<(), CommandFailed> {
    match client.profile().await {
        Ok(profile) => {
            println!("Username: {}", profile.username);
            println!(
                "Email:    {}",
                profile.email.as_deref().unwrap_or("Not provided")
            );
            println!(
                "Status:   {}",
                if profile.active { "Active" } else { "Inactive" }
            );
            Ok(())
        }
        Err(err) => Err(report_failure(&err, "Failed to load profile")),
    }
}

/// Change the account password.
pub async fn update(client: &ApiClient, password: SecretString) -> Result<(), CommandFailed> {
    match client.update_profile(&password).await {
        Ok(()) => {
            println!("Profile updated successfully");
            Ok(())
        }
        Err(err) => Err(report_failure(&err, "Failed to update profile")),
    }
}

/// Permanently delete the account.
///
/// Refuses to act without `--yes`; deleting is irreversible and the
/// session is cleared as soon as the server confirms.
pub async fn delete(client: &ApiClient, yes: bool) -> Result<(), CommandFailed> {
    if !yes {
        eprintln!("This will permanently delete your account. Re-run with --yes to confirm.");
        return Ok(());
    }

    match client.delete_profile().await {
        Ok(()) => {
            println!("Account deleted successfully");
            Ok(())
        }
        Err(err) => Err(report_failure(&err, "Failed to delete account")),
    }
}
