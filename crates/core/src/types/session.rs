//! Session and profile types.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// The profile half of a session, as returned by `POST /api/auth/login`.
///
/// Persisted alongside the token; the `is_admin` flag gates the admin login
/// path client-side (the server remains the authority on every call).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// An authenticated identity: opaque bearer token plus profile.
///
/// Presence of a token means the user was authenticated at issuance time;
/// the client never verifies validity locally and trusts a 401 response to
/// signal expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}
