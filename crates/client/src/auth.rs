//! Login and registration flow.
//!
//! A small state machine: `Anonymous -> Authenticating -> Authenticated`,
//! falling back to `Anonymous` on failure or logout. An admin login attempt
//! additionally requires the server-confirmed profile to carry the admin
//! flag; on mismatch the issued token is never persisted, so no
//! elevated-looking session state is left behind.

use std::sync::{Arc, RwLock};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use ecopuls_core::{Session, UserProfile};

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::session::SessionError;

/// Rejection shown when a non-admin account attempts the admin login path.
const NOT_ADMIN_MESSAGE: &str =
    "This account is not an admin. Use User Login or register as admin.";

/// Errors that can occur during login, registration, or logout.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server confirmed the login but the account is not an admin.
    #[error("{NOT_ADMIN_MESSAGE}")]
    NotAdmin,

    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Persisting or clearing the session failed.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Authentication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    user: UserProfile,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    #[serde(rename = "adminSecret", skip_serializing_if = "Option::is_none")]
    admin_secret: Option<&'a str>,
}

/// Registration responses vary by backend version; parse defensively.
#[derive(Deserialize)]
struct RegisterResponse {
    #[serde(default)]
    message: Option<String>,
}

/// The login/registration state machine.
///
/// Cheap to clone; clones share state and the underlying session store.
#[derive(Debug, Clone)]
pub struct AuthFlow {
    http: ApiClient,
    state: Arc<RwLock<AuthState>>,
}

impl AuthFlow {
    /// Create a flow over an HTTP client. Starts `Authenticated` when the
    /// client's session store already holds a persisted session.
    #[must_use]
    pub fn new(http: ApiClient) -> Self {
        let initial = if http.session().current().is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        };
        Self {
            http,
            state: Arc::new(RwLock::new(initial)),
        }
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        *self
            .state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Log in with email and password.
    ///
    /// With `admin_attempt`, the confirmed profile must carry the admin
    /// flag; otherwise the flow reports [`AuthError::NotAdmin`], discards
    /// the issued token, and stays `Anonymous`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` on empty fields, backend rejection, admin
    /// mismatch, or a session persistence failure. Any failure leaves the
    /// state `Anonymous`.
    #[instrument(skip(self, password), fields(email = %email, admin_attempt))]
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        admin_attempt: bool,
    ) -> Result<Session, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ApiError::Validation("email and password are required".to_string()).into());
        }

        self.set_state(AuthState::Authenticating);
        let result = self.do_login(email, password, admin_attempt).await;
        match &result {
            Ok(_) => self.set_state(AuthState::Authenticated),
            Err(_) => self.set_state(AuthState::Anonymous),
        }
        result
    }

    async fn do_login(
        &self,
        email: &str,
        password: &str,
        admin_attempt: bool,
    ) -> Result<Session, AuthError> {
        let response: LoginResponse = self
            .http
            .post_json("/api/auth/login", &LoginRequest { email, password })
            .await?;

        if admin_attempt && !response.user.is_admin {
            warn!(email = %email, "Admin login attempt by non-admin account");
            return Err(AuthError::NotAdmin);
        }

        self.http
            .session()
            .set_session(response.token.clone(), response.user.clone())?;
        debug!(is_admin = response.user.is_admin, "Logged in");

        Ok(Session {
            token: response.token,
            user: response.user,
        })
    }

    /// Register a new account. Success does not log the user in; the caller
    /// is expected to proceed to login. The optional admin secret is
    /// forwarded opaquely.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` on empty fields or backend rejection.
    #[instrument(skip(self, password, admin_secret), fields(email = %email))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        admin_secret: Option<&SecretString>,
    ) -> Result<String, AuthError> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(
                ApiError::Validation("name, email, and password are required".to_string()).into(),
            );
        }

        let request = RegisterRequest {
            name,
            email,
            password,
            admin_secret: admin_secret.map(ExposeSecret::expose_secret),
        };
        let response: RegisterResponse = self.http.post_json("/api/auth/register", &request).await?;

        Ok(response
            .message
            .unwrap_or_else(|| "Registration successful! Please log in.".to_string()))
    }

    /// Log out: clear the persisted session and return to `Anonymous`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Session` if clearing persisted state fails; the
    /// in-memory state still resets.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.set_state(AuthState::Anonymous);
        self.http.session().clear()?;
        debug!("Logged out");
        Ok(())
    }

    /// Handle a server-side 401 from any controller: the session has
    /// expired, so drop it and return to `Anonymous`. Callers should then
    /// surface a re-authentication prompt.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Session` if clearing persisted state fails.
    pub fn note_unauthorized(&self) -> Result<(), AuthError> {
        warn!("Server rejected token (401); dropping session");
        self.logout()
    }

    fn set_state(&self, state: AuthState) {
        *self
            .state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = state;
    }
}
