//! Custom product request controller.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use ecopuls_core::{CustomRequest, CustomRequestId};

use crate::error::ApiError;
use crate::http::ApiClient;

use super::collection::{HasId, SharedCache};

impl HasId for CustomRequest {
    type Id = CustomRequestId;

    fn id(&self) -> &CustomRequestId {
        &self.id
    }
}

/// Payload of the "request a custom product" form. Name and contact are the
/// form's required fields; the rest are free text.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewCustomRequest {
    pub name: String,
    /// Email or phone number.
    pub contact: String,
    pub size: String,
    pub quantity: String,
    pub details: String,
}

impl NewCustomRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("name is required".to_string()));
        }
        if self.contact.trim().is_empty() {
            return Err(ApiError::Validation("contact is required".to_string()));
        }
        Ok(())
    }
}

/// Controller for the custom request collection.
#[derive(Debug, Clone)]
pub struct CustomRequestController {
    http: ApiClient,
    cache: Arc<SharedCache<CustomRequest>>,
}

impl CustomRequestController {
    #[must_use]
    pub fn new(http: ApiClient) -> Self {
        Self {
            http,
            cache: Arc::new(SharedCache::default()),
        }
    }

    /// Snapshot of the cached requests.
    #[must_use]
    pub fn items(&self) -> Vec<CustomRequest> {
        self.cache.items()
    }

    /// Fetch all custom requests (public endpoint).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-2xx response.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<CustomRequest>, ApiError> {
        let seq = self.cache.begin_fetch();
        let requests: Vec<CustomRequest> = self.http.get_json("/api/custom-products").await?;
        if !self.cache.commit_fetch(seq, requests.clone()) {
            debug!(seq, "Discarding stale custom request listing");
        }
        Ok(requests)
    }

    /// Submit the custom product form. Success means the form can be reset
    /// and closed; on failure the caller keeps the payload for retry.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` when name or contact is empty (checked
    /// before submission), or `ApiError` from the request itself.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn submit(&self, request: &NewCustomRequest) -> Result<CustomRequest, ApiError> {
        request.validate()?;
        let created: CustomRequest = self.http.post_json("/api/custom-products", request).await?;
        self.cache.apply_created(created.clone());
        Ok(created)
    }

    /// Delete a request. Callers must have confirmed the deletion first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` from the request; the cache is untouched on
    /// failure.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn remove(&self, id: &CustomRequestId) -> Result<(), ApiError> {
        let path = format!("/api/custom-products/{id}");
        self.http.delete(&path, None).await?;
        self.cache.apply_removed(id);
        Ok(())
    }
}
