//! Integration tests for the Ecopuls headless client.
//!
//! The backend is an external collaborator, so every test runs against a
//! `wiremock` mock server speaking the documented REST surface. Tests live
//! in `tests/` and share the [`TestContext`] helper below.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ecopuls-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `auth_flow` - login/registration state machine and session persistence
//! - `products` - catalog CRUD, cache mirroring, stale-listing discard
//! - `feedback_custom` - public form submissions and deletions
//! - `users` - admin-gated listing and the admin flag toggle

use wiremock::MockServer;

use ecopuls_client::{ApiClient, ApiConfig, AuthFlow, SessionStore};
use ecopuls_core::{UserId, UserProfile};

/// One mock backend plus a client wired to it.
pub struct TestContext {
    pub server: MockServer,
    pub client: ApiClient,
    pub auth: AuthFlow,
    pub store: SessionStore,
}

impl TestContext {
    /// Start a mock server and point a fresh client (anonymous, in-memory
    /// session) at it.
    ///
    /// # Panics
    ///
    /// Panics if the mock server URI is not a valid URL (never in practice).
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let config = ApiConfig::with_base_url(&server.uri()).expect("mock server uri is a url");
        let store = SessionStore::in_memory();
        let client = ApiClient::new(&config, store.clone());
        let auth = AuthFlow::new(client.clone());
        Self {
            server,
            client,
            auth,
            store,
        }
    }

    /// Inject a session directly, as if a login had already happened.
    ///
    /// # Panics
    ///
    /// Panics if the in-memory store rejects the session (it cannot).
    pub fn log_in(&self, is_admin: bool) {
        self.store
            .set_session(
                "test-token".to_string(),
                UserProfile {
                    id: UserId::new("session-user"),
                    name: "Test Admin".to_string(),
                    email: "admin@example.com".to_string(),
                    is_admin,
                },
            )
            .expect("in-memory session store cannot fail");
    }
}

/// The bearer header value matching [`TestContext::log_in`].
pub const TEST_BEARER: &str = "Bearer test-token";
