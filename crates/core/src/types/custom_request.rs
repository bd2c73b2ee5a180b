//! Custom product request domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::CustomRequestId;

/// A custom product request as returned by `GET /api/custom-products`.
///
/// Immutable once created except for deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomRequest {
    /// Server-issued identifier.
    #[serde(rename = "_id")]
    pub id: CustomRequestId,
    pub name: String,
    /// Email or phone number.
    pub contact: String,
    #[serde(default)]
    pub size: String,
    /// Free text, e.g. "5 pieces".
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_wire_format() {
        let json = r#"{
            "_id": "cr1",
            "name": "Ravi",
            "contact": "ravi@example.com",
            "size": "Medium",
            "quantity": "5 pieces",
            "details": "Natural dye only",
            "createdAt": "2025-12-01T08:00:00Z"
        }"#;
        let request: CustomRequest = serde_json::from_str(json).expect("deserialize");
        assert_eq!(request.name, "Ravi");
        assert_eq!(request.quantity, "5 pieces");
    }
}
