//! Product catalog controller.
//!
//! Create and update go over multipart (the backend's upload endpoint expects
//! form fields even when no file is attached): `name`, `price`,
//! `description`, then either an `image` file part or an `imageUrl` text
//! field, and `sizes` as a JSON string when variants exist.

use std::path::PathBuf;
use std::sync::Arc;

use reqwest::Method;
use reqwest::multipart::{Form, Part};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, instrument};

use ecopuls_core::{Product, ProductId, Variant};

use crate::error::ApiError;
use crate::http::ApiClient;

use super::collection::{HasId, SharedCache};

const AUTH_MESSAGE: &str = "You must be logged in as an admin to manage products.";

impl HasId for Product {
    type Id = ProductId;

    fn id(&self) -> &ProductId {
        &self.id
    }
}

/// Image reference on a product form: an uploaded file, an external URL, or
/// nothing (keep the placeholder / existing image).
#[derive(Debug, Clone, Default)]
pub enum ImageSource {
    #[default]
    None,
    /// Upload a local file as the `image` part.
    File(PathBuf),
    /// Pass an external image URL as the `imageUrl` field.
    Url(String),
}

/// Fields of the admin product form.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    /// Blank price on the form submits as zero.
    pub price: Decimal,
    pub description: String,
    pub image: ImageSource,
    pub sizes: Vec<Variant>,
}

/// Variant wire shape for the `sizes` JSON string (prices as numbers).
#[derive(Serialize)]
struct VariantPayload<'a> {
    label: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    dimension: &'a str,
}

impl ProductForm {
    fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("product name is required".to_string()));
        }
        Ok(())
    }

    async fn into_multipart(self) -> Result<Form, ApiError> {
        let mut form = Form::new()
            .text("name", self.name)
            .text("price", self.price.to_string())
            .text("description", self.description);

        match self.image {
            ImageSource::File(path) => {
                let file_name = path
                    .file_name()
                    .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());
                let bytes = tokio::fs::read(&path)
                    .await
                    .map_err(|e| ApiError::Validation(format!("cannot read image file: {e}")))?;
                form = form.part("image", Part::bytes(bytes).file_name(file_name));
            }
            ImageSource::Url(url) => {
                form = form.text("imageUrl", url);
            }
            ImageSource::None => {}
        }

        if !self.sizes.is_empty() {
            let payload: Vec<VariantPayload<'_>> = self
                .sizes
                .iter()
                .map(|v| VariantPayload {
                    label: &v.label,
                    price: v.price,
                    dimension: &v.dimension,
                })
                .collect();
            let json = serde_json::to_string(&payload)
                .map_err(|e| ApiError::Validation(format!("cannot encode sizes: {e}")))?;
            form = form.text("sizes", json);
        }

        Ok(form)
    }
}

/// Controller for the product collection.
///
/// Cheap to clone; clones share the cache.
#[derive(Debug, Clone)]
pub struct ProductController {
    http: ApiClient,
    cache: Arc<SharedCache<Product>>,
}

impl ProductController {
    #[must_use]
    pub fn new(http: ApiClient) -> Self {
        Self {
            http,
            cache: Arc::new(SharedCache::default()),
        }
    }

    /// Snapshot of the cached catalog.
    #[must_use]
    pub fn items(&self) -> Vec<Product> {
        self.cache.items()
    }

    /// Fetch the catalog (public endpoint). Returns the fresh listing; the
    /// cache is only overwritten if no younger fetch has landed meanwhile.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-2xx response.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        let seq = self.cache.begin_fetch();
        let products: Vec<Product> = self.http.get_json("/api/products").await?;
        if !self.cache.commit_fetch(seq, products.clone()) {
            debug!(seq, "Discarding stale product listing");
        }
        Ok(products)
    }

    /// Create a product (admin only). The server-returned entity, with its
    /// server-assigned id, is prepended to the cache.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` on an empty name,
    /// `ApiError::AuthRequired` when not logged in, or `ApiError` from the
    /// request itself.
    #[instrument(skip(self, form), fields(name = %form.name))]
    pub async fn create(&self, form: ProductForm) -> Result<Product, ApiError> {
        form.validate()?;
        let multipart = form.into_multipart().await?;
        let created: Product = self
            .http
            .send_multipart_authed(Method::POST, "/api/products", multipart, AUTH_MESSAGE)
            .await?;
        self.cache.apply_created(created.clone());
        Ok(created)
    }

    /// Update a product (admin only). The cache entry matching the returned
    /// id is replaced wholesale.
    ///
    /// # Errors
    ///
    /// As [`Self::create`].
    #[instrument(skip(self, form), fields(id = %id))]
    pub async fn update(&self, id: &ProductId, form: ProductForm) -> Result<Product, ApiError> {
        form.validate()?;
        let multipart = form.into_multipart().await?;
        let path = format!("/api/products/{id}");
        let updated: Product = self
            .http
            .send_multipart_authed(Method::PUT, &path, multipart, AUTH_MESSAGE)
            .await?;
        self.cache.apply_updated(updated.clone());
        Ok(updated)
    }

    /// Delete a product (admin only). Callers must have confirmed the
    /// deletion before calling; on success the entry leaves the cache.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthRequired` when not logged in, or `ApiError`
    /// from the request itself (a repeat delete yields a not-found `Server`
    /// error and leaves the cache untouched).
    #[instrument(skip(self), fields(id = %id))]
    pub async fn remove(&self, id: &ProductId) -> Result<(), ApiError> {
        let path = format!("/api/products/{id}");
        self.http.delete(&path, Some(AUTH_MESSAGE)).await?;
        self.cache.apply_removed(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn test_form_validation_requires_name() {
        let form = ProductForm {
            name: "   ".to_string(),
            ..ProductForm::default()
        };
        assert!(matches!(form.validate(), Err(ApiError::Validation(_))));

        let form = ProductForm {
            name: "Jute Basket".to_string(),
            ..ProductForm::default()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_sizes_payload_serializes_prices_as_numbers() {
        let payload = vec![VariantPayload {
            label: "4 inch",
            price: dec!(299),
            dimension: "8*11.5 cm",
        }];
        let json = serde_json::to_string(&payload).expect("serialize");
        assert_eq!(
            json,
            r#"[{"label":"4 inch","price":299.0,"dimension":"8*11.5 cm"}]"#
        );
    }
}
