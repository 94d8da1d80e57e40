//! Product record as served by the storefront API.

use serde::{Deserialize, Serialize};

use crate::types::{Category, Price};

/// A product listing.
///
/// Read-only from the client's perspective: products are fetched fresh from
/// the API on every listing, search, or filter action and never cached. The
/// server may omit the trailing fields (`imageUrl`, `rating`,
/// `reviewCount`, `active`), so they default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned identifier, when the server includes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Units in stock, never negative.
    pub stock: u32,
    /// Category label, also usable as a filter key.
    pub category: Category,
    /// Image location, when the server provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Average review rating, 0.0 when unreviewed.
    #[serde(default)]
    pub rating: f64,
    /// Number of reviews behind the rating.
    #[serde(default)]
    pub review_count: u32,
    /// Whether the product is currently offered.
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

impl Product {
    /// Whether any units are available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_deserialize_minimal() {
        let json = r#"{
            "name": "Widget",
            "description": "A widget",
            "price": 19.99,
            "stock": 3,
            "category": "Tools"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name, "Widget");
        assert_eq!(product.price.amount(), Decimal::new(1999, 2));
        assert_eq!(product.stock, 3);
        assert_eq!(product.category.as_str(), "Tools");
        assert_eq!(product.id, None);
        assert_eq!(product.image_url, None);
        assert!(product.active);
        assert!(product.in_stock());
    }

    #[test]
    fn test_deserialize_full() {
        let json = r#"{
            "id": "p-1",
            "name": "Widget",
            "description": "A widget",
            "price": 19.99,
            "stock": 0,
            "category": "Tools",
            "imageUrl": "https://img.example/widget.png",
            "rating": 4.5,
            "reviewCount": 12,
            "active": false
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_deref(), Some("p-1"));
        assert_eq!(product.image_url.as_deref(), Some("https://img.example/widget.png"));
        assert!((product.rating - 4.5).abs() < f64::EPSILON);
        assert_eq!(product.review_count, 12);
        assert!(!product.active);
        assert!(!product.in_stock());
    }
}
