//! Feedback entry domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::FeedbackId;

/// A customer feedback entry as returned by `GET /api/feedback`.
///
/// Entries are immutable once created; the only mutation the backend accepts
/// is deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    /// Server-issued identifier.
    #[serde(rename = "_id")]
    pub id: FeedbackId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Experience rating, 1 (worst) to 5 (best). Optional on the form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default)]
    pub message: String,
    /// Product viewed or purchased, free text.
    #[serde(default)]
    pub product: String,
    /// Shopping experience selection (e.g. "Smooth", "Confusing").
    #[serde(default)]
    pub experience: String,
    /// Whether the customer's query was answered ("yes"/"no").
    #[serde(default)]
    pub support: String,
    #[serde(default)]
    pub unresolved: String,
    /// Newsletter opt-in checkbox.
    #[serde(default)]
    pub subscribe: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_entry() {
        let json = r#"{
            "_id": "fb1",
            "name": "Asha",
            "email": "asha@example.com",
            "rating": 4,
            "message": "Lovely baskets",
            "product": "Jute Basket",
            "experience": "Smooth",
            "support": "yes",
            "unresolved": "",
            "subscribe": true,
            "createdAt": "2025-11-02T10:15:00Z"
        }"#;
        let entry: FeedbackEntry = serde_json::from_str(json).expect("deserialize");
        assert_eq!(entry.rating, Some(4));
        assert!(entry.subscribe);
        assert!(entry.created_at.is_some());
    }

    #[test]
    fn test_deserialize_sparse_entry() {
        // The form submits every field, but older documents may lack most.
        let json = r#"{"_id": "fb2"}"#;
        let entry: FeedbackEntry = serde_json::from_str(json).expect("deserialize");
        assert_eq!(entry.rating, None);
        assert!(!entry.subscribe);
    }
}
