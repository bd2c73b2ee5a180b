//! Product and variant domain types.
//!
//! Price display rules: when a product carries variants, the variant list is
//! the source of truth - the listing price is the minimum variant price and
//! the detail price is the selected variant's price (selection defaults to
//! the first variant). Products without variants fall back to the scalar
//! `price` field.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A catalog product as returned by `GET /api/products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-issued identifier.
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    /// Scalar price, authoritative only when `sizes` is empty.
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    /// Either an absolute URL or a server-relative path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Ordered size/dimension variants, possibly empty.
    #[serde(default)]
    pub sizes: Vec<Variant>,
}

/// A priced size/dimension option attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub label: String,
    pub price: Decimal,
    #[serde(default)]
    pub dimension: String,
}

impl Product {
    /// Price shown in listing context: the minimum variant price when
    /// variants exist, the scalar price otherwise.
    #[must_use]
    pub fn list_price(&self) -> Decimal {
        self.sizes
            .iter()
            .map(|v| v.price)
            .min()
            .unwrap_or(self.price)
    }

    /// Price shown in detail context for the variant at `selected`.
    ///
    /// Out-of-range selections clamp to the first variant, matching the
    /// detail view's default of index 0 on open. Returns the scalar price
    /// when there are no variants.
    #[must_use]
    pub fn detail_price(&self, selected: usize) -> Decimal {
        if self.sizes.is_empty() {
            return self.price;
        }
        self.sizes
            .get(selected)
            .or_else(|| self.sizes.first())
            .map_or(self.price, |v| v.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn product_with_sizes() -> Product {
        Product {
            id: ProductId::new("p1"),
            name: "Jute Basket".to_string(),
            price: dec!(499),
            description: "Handwoven".to_string(),
            image_url: None,
            sizes: vec![
                Variant {
                    label: "4 inch".to_string(),
                    price: dec!(299),
                    dimension: "8*11.5 cm".to_string(),
                },
                Variant {
                    label: "6 inch".to_string(),
                    price: dec!(199),
                    dimension: "10*14 cm".to_string(),
                },
                Variant {
                    label: "8 inch".to_string(),
                    price: dec!(399),
                    dimension: "12*16 cm".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_list_price_minimum_variant() {
        assert_eq!(product_with_sizes().list_price(), dec!(199));
    }

    #[test]
    fn test_list_price_scalar_without_variants() {
        let mut product = product_with_sizes();
        product.sizes.clear();
        assert_eq!(product.list_price(), dec!(499));
    }

    #[test]
    fn test_detail_price_selected_variant() {
        let product = product_with_sizes();
        assert_eq!(product.detail_price(0), dec!(299));
        assert_eq!(product.detail_price(2), dec!(399));
    }

    #[test]
    fn test_detail_price_out_of_range_defaults_to_first() {
        let product = product_with_sizes();
        assert_eq!(product.detail_price(99), dec!(299));
    }

    #[test]
    fn test_detail_price_scalar_without_variants() {
        let mut product = product_with_sizes();
        product.sizes.clear();
        assert_eq!(product.detail_price(0), dec!(499));
    }

    #[test]
    fn test_deserialize_wire_format() {
        let json = r#"{
            "_id": "66f1a2",
            "name": "Gunny Bag",
            "price": 149,
            "description": "Reusable",
            "imageUrl": "/uploads/gunny.png",
            "sizes": []
        }"#;
        let product: Product = serde_json::from_str(json).expect("deserialize");
        assert_eq!(product.id, ProductId::new("66f1a2"));
        assert_eq!(product.image_url.as_deref(), Some("/uploads/gunny.png"));
        assert!(product.sizes.is_empty());
    }

    #[test]
    fn test_deserialize_missing_optional_fields() {
        // Older documents may omit description, imageUrl, and sizes entirely.
        let json = r#"{"_id": "66f1a3", "name": "Coir Mat", "price": 99}"#;
        let product: Product = serde_json::from_str(json).expect("deserialize");
        assert!(product.image_url.is_none());
        assert!(product.sizes.is_empty());
        assert_eq!(product.description, "");
    }
}
