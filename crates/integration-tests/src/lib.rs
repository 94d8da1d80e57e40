//! Integration test support for Shopfront.
//!
//! Provides an in-process stub of the storefront API and a [`TestContext`]
//! that wires an [`ApiClient`] to it over real HTTP with a throwaway data
//! directory.
//!
//! The stub speaks the production wire contract (every JSON response is
//! the `{ success, data?, message? }` envelope) and additionally records
//! per-route hit counts and the last `Authorization` header it saw, so
//! tests can assert not just on outcomes but on whether and how the
//! network was used.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```

// Test support: panicking on broken fixtures is the correct failure mode.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::routing::post;
use axum::Json;
use secrecy::SecretString;
use serde_json::{Value, json};
use shopfront_client::{ApiClient, ClientConfig};
use tempfile::TempDir;

// ─────────────────────────────────────────────────────────────────────────────
// Stub state
// ─────────────────────────────────────────────────────────────────────────────

/// A registered account on the stub server.
#[derive(Debug, Clone)]
pub struct StubUser {
    pub password: String,
    pub email: Option<String>,
    pub active: bool,
}

/// Shared state behind the stub API.
pub struct StubState {
    users: Mutex<HashMap<String, StubUser>>,
    /// token -> username
    sessions: Mutex<HashMap<String, String>>,
    products: Vec<Value>,
    hits: Mutex<HashMap<&'static str, usize>>,
    last_auth_header: Mutex<Option<String>>,
    token_counter: AtomicU64,
    malformed: AtomicBool,
}

impl Default for StubState {
    fn default() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            sessions: Mutex::new(HashMap::new()),
            products: fixture_products(),
            hits: Mutex::new(HashMap::new()),
            last_auth_header: Mutex::new(None),
            token_counter: AtomicU64::new(0),
            malformed: AtomicBool::new(false),
        }
    }
}

impl StubState {
    /// Seed an account without going through the API.
    pub fn seed_user(&self, username: &str, password: &str, email: Option<&str>) {
        self.lock_users().insert(
            username.to_string(),
            StubUser {
                password: password.to_string(),
                email: email.map(String::from),
                active: true,
            },
        );
    }

    /// Invalidate every server-side session, leaving clients holding dead
    /// tokens.
    pub fn clear_sessions(&self) {
        self.lock(&self.sessions).clear();
    }

    /// Make every enveloped endpoint answer with non-JSON garbage.
    pub fn set_malformed(&self, malformed: bool) {
        self.malformed.store(malformed, Ordering::SeqCst);
    }

    /// How many times a route was hit. Keys: `login`, `register`, `logout`,
    /// `products`, `search`, `category`, `categories`, `profile`, `health`.
    pub fn hits(&self, route: &str) -> usize {
        self.lock(&self.hits).get(route).copied().unwrap_or(0)
    }

    /// Total requests served across all routes.
    pub fn total_hits(&self) -> usize {
        self.lock(&self.hits).values().sum()
    }

    /// The `Authorization` header of the most recent authenticated call.
    pub fn last_auth_header(&self) -> Option<String> {
        self.lock(&self.last_auth_header).clone()
    }

    fn record_hit(&self, route: &'static str) {
        *self.lock(&self.hits).entry(route).or_insert(0) += 1;
    }

    fn issue_token(&self, username: &str) -> String {
        let n = self.token_counter.fetch_add(1, Ordering::SeqCst);
        let token = format!("stub-token-{n}");
        self.lock(&self.sessions)
            .insert(token.clone(), username.to_string());
        token
    }

    fn lock_users(&self) -> std::sync::MutexGuard<'_, HashMap<String, StubUser>> {
        self.lock(&self.users)
    }

    fn lock<'a, T>(&self, mutex: &'a Mutex<T>) -> std::sync::MutexGuard<'a, T> {
        mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn fixture_products() -> Vec<Value> {
    vec![
        json!({
            "id": "p-1",
            "name": "Blue Shirt",
            "description": "Cotton shirt in blue",
            "price": 19.99,
            "stock": 12,
            "category": "Apparel",
            "rating": 4.2,
            "reviewCount": 9,
            "active": true
        }),
        json!({
            "id": "p-2",
            "name": "Red Mug",
            "description": "Stoneware mug, 350ml",
            "price": 7.5,
            "stock": 40,
            "category": "Kitchen"
        }),
        json!({
            "id": "p-3",
            "name": "Walnut Desk",
            "description": "Solid walnut writing desk",
            "price": 349.0,
            "stock": 3,
            "category": "Furniture"
        }),
        json!({
            "id": "p-4",
            "name": "Desk Lamp",
            "description": "Adjustable brass desk lamp",
            "price": 24.95,
            "stock": 0,
            "category": "Furniture"
        }),
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Stub server
// ─────────────────────────────────────────────────────────────────────────────

/// Handle to a running stub API server.
pub struct StubServer {
    addr: SocketAddr,
    pub state: Arc<StubState>,
}

impl StubServer {
    /// Bind an ephemeral port and serve the stub API in the background.
    pub async fn spawn() -> Self {
        let state = Arc::new(StubState::default());
        let app = router(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind stub server");
        let addr = listener.local_addr().expect("failed to read stub address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server crashed");
        });

        Self { addr, state }
    }

    /// Base endpoint root for client configuration.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

fn router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/logout", post(logout))
        .route("/products", get(products))
        .route("/products/search/{query}", get(search))
        .route("/products/category/{category}", get(by_category))
        .route("/categories", get(categories))
        .route(
            "/profile",
            get(profile_get).put(profile_update).delete(profile_delete),
        )
        .with_state(state)
}

fn ok(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

fn ok_message(message: &str) -> Value {
    json!({ "success": true, "message": message })
}

fn fail(message: &str) -> Value {
    json!({ "success": false, "message": message })
}

/// Respond with the envelope, or garbage when malformed mode is on.
fn respond(state: &StubState, envelope: Value) -> Response {
    if state.malformed.load(Ordering::SeqCst) {
        return "<html>service temporarily unavailable</html>"
            .to_string()
            .into_response();
    }
    Json(envelope).into_response()
}

/// Resolve the session behind the request's bearer token, recording the
/// raw header for later assertions.
fn authed_user(state: &StubState, headers: &HeaderMap) -> Option<String> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?;
    *state.lock(&state.last_auth_header) = Some(value.to_string());

    let token = value.strip_prefix("Bearer ")?;
    state.lock(&state.sessions).get(token).cloned()
}

async fn health(State(state): State<Arc<StubState>>) -> Response {
    state.record_hit("health");
    "Server is running".into_response()
}

async fn login(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    state.record_hit("login");

    let username = body["username"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default();

    let valid = state
        .lock_users()
        .get(&username)
        .is_some_and(|u| u.password == password);

    if !valid {
        return respond(&state, fail("Invalid password"));
    }

    let token = state.issue_token(&username);
    respond(
        &state,
        ok(json!({ "sessionToken": token, "username": username })),
    )
}

async fn register(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    state.record_hit("register");

    let username = body["username"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();
    let email = body["email"].as_str().map(String::from);

    let mut users = state.lock_users();
    if users.contains_key(&username) {
        drop(users);
        return respond(&state, fail("User exists"));
    }

    users.insert(
        username,
        StubUser {
            password,
            email,
            active: true,
        },
    );
    drop(users);

    respond(&state, ok_message("User registered"))
}

async fn logout(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    state.record_hit("logout");

    let Some(_username) = authed_user(&state, &headers) else {
        return respond(&state, fail("Unauthorized"));
    };

    if let Some(value) = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok())
        && let Some(token) = value.strip_prefix("Bearer ")
    {
        state.lock(&state.sessions).remove(token);
    }

    respond(&state, ok_message("Logged out"))
}

async fn products(State(state): State<Arc<StubState>>) -> Response {
    state.record_hit("products");
    respond(&state, ok(Value::Array(state.products.clone())))
}

async fn search(State(state): State<Arc<StubState>>, Path(query): Path<String>) -> Response {
    state.record_hit("search");

    let needle = query.to_lowercase();
    let matches: Vec<Value> = state
        .products
        .iter()
        .filter(|p| {
            let name = p["name"].as_str().unwrap_or_default().to_lowercase();
            let description = p["description"].as_str().unwrap_or_default().to_lowercase();
            name.contains(&needle) || description.contains(&needle)
        })
        .cloned()
        .collect();

    respond(&state, ok(Value::Array(matches)))
}

async fn by_category(
    State(state): State<Arc<StubState>>,
    Path(category): Path<String>,
) -> Response {
    state.record_hit("category");

    let matches: Vec<Value> = state
        .products
        .iter()
        .filter(|p| p["category"].as_str() == Some(category.as_str()))
        .cloned()
        .collect();

    respond(&state, ok(Value::Array(matches)))
}

async fn categories(State(state): State<Arc<StubState>>) -> Response {
    state.record_hit("categories");

    let mut labels: Vec<&str> = state
        .products
        .iter()
        .filter_map(|p| p["category"].as_str())
        .collect();
    labels.sort_unstable();
    labels.dedup();

    respond(&state, ok(json!(labels)))
}

async fn profile_get(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    state.record_hit("profile");

    let Some(username) = authed_user(&state, &headers) else {
        return respond(&state, fail("Unauthorized"));
    };

    let users = state.lock_users();
    let Some(user) = users.get(&username) else {
        return respond(&state, fail("Unauthorized"));
    };

    let envelope = ok(json!({
        "username": username,
        "email": user.email,
        "active": user.active,
    }));
    drop(users);

    respond(&state, envelope)
}

async fn profile_update(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record_hit("profile");

    let Some(username) = authed_user(&state, &headers) else {
        return respond(&state, fail("Unauthorized"));
    };

    let password = body["password"].as_str().unwrap_or_default();
    if password.is_empty() {
        return respond(&state, fail("Password cannot be empty"));
    }

    if let Some(user) = state.lock_users().get_mut(&username) {
        user.password = password.to_string();
    }

    respond(&state, ok_message("Profile updated"))
}

async fn profile_delete(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    state.record_hit("profile");

    let Some(username) = authed_user(&state, &headers) else {
        return respond(&state, fail("Unauthorized"));
    };

    state.lock_users().remove(&username);
    state
        .lock(&state.sessions)
        .retain(|_, name| *name != username);

    respond(&state, ok_message("Account deleted"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Test context
// ─────────────────────────────────────────────────────────────────────────────

/// A stub server plus a client wired to it over a throwaway data directory.
pub struct TestContext {
    pub client: ApiClient,
    pub stub: StubServer,
    data_dir: TempDir,
}

impl TestContext {
    /// Spawn a stub server and build a fresh client against it.
    pub async fn new() -> Self {
        let stub = StubServer::spawn().await;
        let data_dir = TempDir::new().expect("failed to create data dir");

        let client =
            ApiClient::new(&config_for(&stub, &data_dir)).expect("failed to build client");

        Self {
            client,
            stub,
            data_dir,
        }
    }

    /// Build a second client over the same data directory, simulating a
    /// process restart.
    pub fn reconnect(&self) -> ApiClient {
        ApiClient::new(&config_for(&self.stub, &self.data_dir)).expect("failed to rebuild client")
    }

    /// Seed an account on the stub and log the client in as it.
    pub async fn login_as(&self, username: &str, password: &str) {
        self.stub.state.seed_user(username, password, Some("user@example.com"));
        self.client
            .login(username, &SecretString::from(password.to_string()))
            .await
            .expect("login failed");
    }
}

fn config_for(stub: &StubServer, data_dir: &TempDir) -> ClientConfig {
    let api_url: url::Url = stub.base_url().parse().expect("invalid stub URL");
    ClientConfig::new(api_url, data_dir.path().to_path_buf())
}
