//! Product and category listings.
//!
//! All read-only pass-throughs: results are fetched fresh from the API on
//! every call and never cached across actions.

use reqwest::Method;
use shopfront_core::{Category, Product};

use super::{ApiClient, Auth};
use crate::error::ApiError;

/// Queries shorter than this are treated as "list everything".
///
/// A UX threshold inherited from the search box, not a validation error:
/// one-character searches are too broad to be useful, so they fall back to
/// the unfiltered listing without a distinct network request.
pub const MIN_SEARCH_LENGTH: usize = 2;

impl ApiClient {
    /// Fetch the full product listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports failure.
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.fetch(Method::GET, "/products", None, Auth::None).await
    }

    /// Search products by name or description.
    ///
    /// The query is trimmed first; anything shorter than
    /// [`MIN_SEARCH_LENGTH`] is redefined as [`Self::list_products`] and no
    /// search request is issued.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports failure.
    pub async fn search_products(&self, query: &str) -> Result<Vec<Product>, ApiError> {
        let query = query.trim();
        if is_listing_query(query) {
            return self.list_products().await;
        }

        let path = format!("/products/search/{}", urlencoding::encode(query));
        self.fetch(Method::GET, &path, None, Auth::None).await
    }

    /// Fetch the products in one category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports failure.
    pub async fn products_by_category(
        &self,
        category: &Category,
    ) -> Result<Vec<Product>, ApiError> {
        let path = format!(
            "/products/category/{}",
            urlencoding::encode(category.as_str())
        );
        self.fetch(Method::GET, &path, None, Auth::None).await
    }

    /// Fetch all category labels.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports failure.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.fetch(Method::GET, "/categories", None, Auth::None)
            .await
    }
}

/// Whether a trimmed query falls under the listing threshold.
fn is_listing_query(trimmed: &str) -> bool {
    trimmed.chars().count() < MIN_SEARCH_LENGTH
}
