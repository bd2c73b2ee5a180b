//! Feedback collection controller.
//!
//! Listing and submission are public; only deletion is an admin action in
//! the back-office, and the backend accepts it unauthenticated.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use ecopuls_core::{FeedbackEntry, FeedbackId};

use crate::error::ApiError;
use crate::http::ApiClient;

use super::collection::{HasId, SharedCache};

impl HasId for FeedbackEntry {
    type Id = FeedbackId;

    fn id(&self) -> &FeedbackId {
        &self.id
    }
}

/// Payload of the public feedback form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewFeedback {
    pub name: String,
    pub email: String,
    /// 1 (worst) to 5 (best); the form's slider is optional.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    pub message: String,
    pub product: String,
    pub experience: String,
    pub support: String,
    pub unresolved: String,
    pub subscribe: bool,
}

impl NewFeedback {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(rating) = self.rating
            && !(1..=5).contains(&rating)
        {
            return Err(ApiError::Validation(format!(
                "rating must be between 1 and 5 (got {rating})"
            )));
        }
        Ok(())
    }
}

/// Controller for the feedback collection.
#[derive(Debug, Clone)]
pub struct FeedbackController {
    http: ApiClient,
    cache: Arc<SharedCache<FeedbackEntry>>,
}

impl FeedbackController {
    #[must_use]
    pub fn new(http: ApiClient) -> Self {
        Self {
            http,
            cache: Arc::new(SharedCache::default()),
        }
    }

    /// Snapshot of the cached entries.
    #[must_use]
    pub fn items(&self) -> Vec<FeedbackEntry> {
        self.cache.items()
    }

    /// Fetch all feedback entries (public endpoint).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-2xx response.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<FeedbackEntry>, ApiError> {
        let seq = self.cache.begin_fetch();
        let entries: Vec<FeedbackEntry> = self.http.get_json("/api/feedback").await?;
        if !self.cache.commit_fetch(seq, entries.clone()) {
            debug!(seq, "Discarding stale feedback listing");
        }
        Ok(entries)
    }

    /// Submit the feedback form. On failure the caller keeps the payload
    /// and may resubmit unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for an out-of-range rating, or
    /// `ApiError` from the request itself.
    #[instrument(skip(self, feedback))]
    pub async fn submit(&self, feedback: &NewFeedback) -> Result<FeedbackEntry, ApiError> {
        feedback.validate()?;
        let created: FeedbackEntry = self.http.post_json("/api/feedback", feedback).await?;
        self.cache.apply_created(created.clone());
        Ok(created)
    }

    /// Delete an entry. Callers must have confirmed the deletion first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` from the request; the cache is untouched on
    /// failure.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn remove(&self, id: &FeedbackId) -> Result<(), ApiError> {
        let path = format!("/api/feedback/{id}");
        self.http.delete(&path, None).await?;
        self.cache.apply_removed(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_validation() {
        let mut feedback = NewFeedback {
            rating: Some(0),
            ..NewFeedback::default()
        };
        assert!(matches!(
            feedback.validate(),
            Err(ApiError::Validation(_))
        ));

        feedback.rating = Some(6);
        assert!(feedback.validate().is_err());

        feedback.rating = Some(5);
        assert!(feedback.validate().is_ok());

        feedback.rating = None;
        assert!(feedback.validate().is_ok());
    }

    #[test]
    fn test_payload_omits_missing_rating() {
        let feedback = NewFeedback {
            name: "Asha".to_string(),
            subscribe: true,
            ..NewFeedback::default()
        };
        let json = serde_json::to_value(&feedback).expect("serialize");
        assert!(json.get("rating").is_none());
        assert_eq!(json["subscribe"], serde_json::json!(true));
    }
}
