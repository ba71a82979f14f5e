//! Catalog endpoints: product browsing and search.
//!
//! Listing and detail responses are cached for 5 minutes; search results are
//! never cached.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use pawcart_core::{Product, ProductId};

use crate::cache::CacheValue;
use crate::http::ApiClient;
use crate::ApiError;

/// Query parameters for product listings.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Free-text search.
    pub search: Option<String>,
    /// Category slug filter.
    pub category: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
}

impl ProductQuery {
    fn as_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        params
    }
}

/// A page of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page")]
    pub total_pages: u32,
}

const fn default_page() -> u32 {
    1
}

impl ProductPage {
    /// Whether another page follows this one.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }
}

impl ApiClient {
    /// Get a paginated list of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: &ProductQuery) -> Result<ProductPage, ApiError> {
        let cache_key = format!(
            "products:{}:{}",
            query.category.as_deref().unwrap_or(""),
            query.page.unwrap_or(1)
        );

        // Cache only non-search listings
        if query.search.is_none() {
            if let Some(CacheValue::Products(page)) = self.cache().get(&cache_key).await {
                debug!("Cache hit for products");
                return Ok(page);
            }
        }

        let page: ProductPage = self
            .send_json(
                self.request(Method::GET, "/products")
                    .query(&query.as_params()),
            )
            .await?;

        if query.search.is_none() {
            self.cache()
                .insert(cache_key, CacheValue::Products(page.clone()))
                .await;
        }

        Ok(page)
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the product does not exist, or another
    /// error if the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product(&self, product_id: &ProductId) -> Result<Product, ApiError> {
        let cache_key = format!("product:{product_id}");

        if let Some(CacheValue::Product(product)) = self.cache().get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self
            .send_json(self.request(Method::GET, &format!("/products/{product_id}")))
            .await?;

        self.cache()
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_skip_missing() {
        let query = ProductQuery {
            search: None,
            category: Some("toys".to_string()),
            page: Some(2),
        };
        assert_eq!(
            query.as_params(),
            vec![("category", "toys".to_string()), ("page", "2".to_string())]
        );
    }

    #[test]
    fn test_has_next_page() {
        let page = ProductPage {
            products: vec![],
            page: 2,
            total_pages: 3,
        };
        assert!(page.has_next_page());
        let last = ProductPage {
            products: vec![],
            page: 3,
            total_pages: 3,
        };
        assert!(!last.has_next_page());
    }
}
