//! End-to-end authentication flows against the stub API.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use secrecy::SecretString;
use shopfront_client::{ApiClient, ClientConfig, ErrorKind};
use shopfront_core::{Email, Username};
use shopfront_integration_tests::TestContext;

fn secret(s: &str) -> SecretString {
    SecretString::from(s.to_string())
}

#[tokio::test]
async fn login_establishes_session_with_returned_token() {
    let ctx = TestContext::new().await;
    ctx.stub.state.seed_user("alice", "pw-1", Some("alice@example.com"));

    let user = ctx.client.login("alice", &secret("pw-1")).await.unwrap();

    assert_eq!(user.username, "alice");
    assert!(ctx.client.session().is_authenticated());
    let token = ctx.client.session().token().unwrap();
    assert!(token.starts_with("stub-token-"));
}

#[tokio::test]
async fn login_failure_surfaces_server_message_verbatim() {
    let ctx = TestContext::new().await;
    ctx.stub.state.seed_user("alice", "pw-1", None);

    let err = ctx
        .client
        .login("alice", &secret("wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(
        err.user_message("Login failed. Please try again."),
        "Invalid password"
    );
    assert!(!ctx.client.session().is_authenticated());
}

#[tokio::test]
async fn transport_failure_uses_fixed_generic_message() {
    // Bind a port, then free it so connections are refused.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let data_dir = tempfile::TempDir::new().unwrap();
    let config = ClientConfig::new(
        format!("http://{addr}").parse().unwrap(),
        data_dir.path().to_path_buf(),
    );
    let client = ApiClient::new(&config).unwrap();

    let err = client.login("alice", &secret("pw")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(
        err.user_message("Login failed. Please try again."),
        "Login failed. Please try again."
    );
}

#[tokio::test]
async fn malformed_response_is_its_own_kind_but_same_user_message() {
    let ctx = TestContext::new().await;
    ctx.stub.state.seed_user("alice", "pw-1", None);
    ctx.stub.state.set_malformed(true);

    let err = ctx.client.login("alice", &secret("pw-1")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Malformed);
    assert_eq!(
        err.user_message("Login failed. Please try again."),
        "Login failed. Please try again."
    );
}

#[tokio::test]
async fn register_then_login() {
    let ctx = TestContext::new().await;

    let username = Username::parse("newbie_1").unwrap();
    let email = Email::parse("newbie@example.com").unwrap();
    ctx.client
        .register(&username, &secret("pw-new"), &email)
        .await
        .unwrap();

    // Registration has no session side effect.
    assert!(!ctx.client.session().is_authenticated());

    ctx.client.login("newbie_1", &secret("pw-new")).await.unwrap();
    assert!(ctx.client.session().is_authenticated());
}

#[tokio::test]
async fn register_taken_username_fails_with_server_message() {
    let ctx = TestContext::new().await;
    ctx.stub.state.seed_user("alice", "pw-1", None);

    let username = Username::parse("alice").unwrap();
    let email = Email::parse("alice@example.com").unwrap();
    let err = ctx
        .client
        .register(&username, &secret("pw-2"), &email)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(err.to_string(), "User exists");
}

#[tokio::test]
async fn logout_clears_session_even_when_server_call_fails() {
    let ctx = TestContext::new().await;
    ctx.login_as("alice", "pw-1").await;

    // Kill the server-side session so the logout call is rejected.
    ctx.stub.state.clear_sessions();

    ctx.client.logout().await.unwrap();
    assert!(!ctx.client.session().is_authenticated());

    // Nothing survives a restart either.
    let reloaded = ctx.reconnect();
    assert!(!reloaded.session().is_authenticated());
}

#[tokio::test]
async fn session_survives_reload() {
    let ctx = TestContext::new().await;
    ctx.login_as("alice", "pw-1").await;
    let token = ctx.client.session().token().unwrap();

    let reloaded = ctx.reconnect();

    assert!(reloaded.session().is_authenticated());
    assert_eq!(reloaded.session().token().unwrap(), token);
    assert_eq!(reloaded.session().current_user().unwrap().username, "alice");

    // The restored token still works against the server.
    reloaded.profile().await.unwrap();
}
