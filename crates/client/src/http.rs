//! Thin HTTP wrapper over `reqwest`.
//!
//! Attaches the session's bearer token when one is present, decodes error
//! bodies defensively (`{message}` JSON with a status-text fallback), and
//! resolves server-relative image paths against the API base.

use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::session::SessionStore;

/// HTTP client for the Ecopuls backend.
///
/// Cheap to clone; the underlying connection pool and session store are
/// shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
    session: SessionStore,
}

impl ApiClient {
    /// Create a new client from configuration and a session store.
    #[must_use]
    pub fn new(config: &ApiConfig, session: SessionStore) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            session,
        }
    }

    /// The session store this client reads tokens from.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The backend base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a product image reference for display.
    ///
    /// Absolute `http(s)` URLs pass through untouched; server-relative paths
    /// are prefixed with the API base, inserting a `/` when missing.
    #[must_use]
    pub fn resolve_image_url(&self, image_url: &str) -> String {
        if image_url.starts_with("http://") || image_url.starts_with("https://") {
            return image_url.to_string();
        }
        let base = self.base_url.as_str().trim_end_matches('/');
        if image_url.starts_with('/') {
            format!("{base}{image_url}")
        } else {
            format!("{base}/{image_url}")
        }
    }

    /// Unauthenticated GET returning JSON.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or an
    /// undecodable body.
    #[instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.client.get(self.endpoint(path)).send().await?;
        Self::decode(response).await
    }

    /// Authenticated GET returning JSON.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthRequired` without issuing the request when no
    /// token is held, otherwise as [`Self::get_json`].
    #[instrument(skip(self, auth_message))]
    pub async fn get_json_authed<T: DeserializeOwned>(
        &self,
        path: &str,
        auth_message: &str,
    ) -> Result<T, ApiError> {
        let token = self.require_token(auth_message)?;
        let response = self
            .client
            .get(self.endpoint(path))
            .bearer_auth(token)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Unauthenticated JSON POST.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or an
    /// undecodable body.
    #[instrument(skip(self, body))]
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Authenticated JSON PUT.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthRequired` without issuing the request when no
    /// token is held, otherwise on transport failure, non-2xx status, or an
    /// undecodable body.
    #[instrument(skip(self, body, auth_message))]
    pub async fn put_json_authed<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        auth_message: &str,
    ) -> Result<T, ApiError> {
        let token = self.require_token(auth_message)?;
        let response = self
            .client
            .put(self.endpoint(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Authenticated multipart POST or PUT (product create/update).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthRequired` without issuing the request when no
    /// token is held, otherwise on transport failure, non-2xx status, or an
    /// undecodable body.
    #[instrument(skip(self, form, auth_message))]
    pub async fn send_multipart_authed<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: reqwest::multipart::Form,
        auth_message: &str,
    ) -> Result<T, ApiError> {
        let token = self.require_token(auth_message)?;
        let response = self
            .client
            .request(method, self.endpoint(path))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// DELETE, optionally authenticated. Discards any response body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthRequired` when `auth` names a message and no
    /// token is held, otherwise on transport failure or non-2xx status.
    #[instrument(skip(self, auth))]
    pub async fn delete(&self, path: &str, auth: Option<&str>) -> Result<(), ApiError> {
        let mut request = self.client.delete(self.endpoint(path));
        if let Some(auth_message) = auth {
            request = request.bearer_auth(self.require_token(auth_message)?);
        }
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            debug!(%status, "Delete confirmed");
            return Ok(());
        }
        Err(Self::error_from_response(response).await)
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}{path}")
    }

    fn require_token(&self, auth_message: &str) -> Result<String, ApiError> {
        self.session
            .token()
            .ok_or_else(|| ApiError::AuthRequired(auth_message.to_string()))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from_response(response).await);
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Build a `Server` error from a non-2xx response.
    ///
    /// The body is parsed defensively: a JSON `{message}` wins, any other
    /// non-empty body is used verbatim, and an empty or unreadable body falls
    /// back to the HTTP status text.
    async fn error_from_response(response: Response) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_message(&body)
            .unwrap_or_else(|| status_text(status));
        ApiError::Server {
            status: status.as_u16(),
            message,
        }
    }
}

/// Pull a human-readable message out of an error body, if there is one.
fn extract_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body)
        && let Some(message) = value.get("message").and_then(|m| m.as_str())
    {
        return Some(message.to_string());
    }
    Some(body.trim().to_string())
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.to_string(), ToString::to_string)
}
