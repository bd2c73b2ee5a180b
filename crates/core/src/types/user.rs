//! User domain type (admin back-office listing).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::UserId;

/// A registered account as returned by `GET /api/users`.
///
/// The only mutable field is `is_admin`, toggled by another admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-issued identifier.
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_wire_format() {
        let json = r#"{
            "_id": "u1",
            "name": "Admin",
            "email": "admin@example.com",
            "isAdmin": true,
            "createdAt": "2025-10-20T12:00:00Z"
        }"#;
        let user: User = serde_json::from_str(json).expect("deserialize");
        assert!(user.is_admin);
    }

    #[test]
    fn test_is_admin_defaults_false() {
        let json = r#"{"_id": "u2", "name": "Maya", "email": "maya@example.com"}"#;
        let user: User = serde_json::from_str(json).expect("deserialize");
        assert!(!user.is_admin);
    }
}
