//! User administration controller.
//!
//! The user listing is the one collection whose read requires a token; the
//! short-circuit happens client-side before any request is issued.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use ecopuls_core::{User, UserId};

use crate::error::ApiError;
use crate::http::ApiClient;

use super::collection::{HasId, SharedCache};

const AUTH_MESSAGE: &str = "You must be logged in as an admin to view users.";

impl HasId for User {
    type Id = UserId;

    fn id(&self) -> &UserId {
        &self.id
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AdminFlagPayload {
    is_admin: bool,
}

/// Controller for the registered-user collection.
#[derive(Debug, Clone)]
pub struct UserController {
    http: ApiClient,
    cache: Arc<SharedCache<User>>,
}

impl UserController {
    #[must_use]
    pub fn new(http: ApiClient) -> Self {
        Self {
            http,
            cache: Arc::new(SharedCache::default()),
        }
    }

    /// Snapshot of the cached users.
    #[must_use]
    pub fn items(&self) -> Vec<User> {
        self.cache.items()
    }

    /// Fetch all users (admin endpoint).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthRequired` without issuing a request when no
    /// token is held, or `ApiError` from the request itself.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        let seq = self.cache.begin_fetch();
        let users: Vec<User> = self.http.get_json_authed("/api/users", AUTH_MESSAGE).await?;
        if !self.cache.commit_fetch(seq, users.clone()) {
            debug!(seq, "Discarding stale user listing");
        }
        Ok(users)
    }

    /// Toggle a user's admin flag: submits the logical negation of the
    /// current value and replaces the cached user with the server's
    /// representation.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthRequired` when not logged in, or `ApiError`
    /// from the request itself.
    #[instrument(skip(self, user), fields(id = %user.id, was_admin = user.is_admin))]
    pub async fn toggle_admin(&self, user: &User) -> Result<User, ApiError> {
        let path = format!("/api/users/{}", user.id);
        let payload = AdminFlagPayload {
            is_admin: !user.is_admin,
        };
        let updated: User = self
            .http
            .put_json_authed(&path, &payload, AUTH_MESSAGE)
            .await?;
        self.cache.apply_updated(updated.clone());
        Ok(updated)
    }

    /// Delete a user. Callers must have confirmed the deletion first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthRequired` when not logged in, or `ApiError`
    /// from the request itself.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn remove(&self, id: &UserId) -> Result<(), ApiError> {
        let path = format!("/api/users/{id}");
        self.http.delete(&path, Some(AUTH_MESSAGE)).await?;
        self.cache.apply_removed(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_flag_payload_shape() {
        let payload = AdminFlagPayload { is_admin: true };
        let json = serde_json::to_string(&payload).expect("serialize");
        assert_eq!(json, r#"{"isAdmin":true}"#);
    }
}
