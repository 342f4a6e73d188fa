//! Catalog endpoints of the backend API, with in-memory caching.
//!
//! Products and categories change rarely compared to how often they are
//! read, so reads go through a `moka` cache with a short TTL. Cart and auth
//! endpoints are never cached.

use std::time::Duration;

use moka::future::Cache;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use thimble_core::{Product, ProductId};

use super::{ApiClient, ApiError, ensure_success};

const CACHE_CAPACITY: u64 = 1000;
const CACHE_TTL: Duration = Duration::from_secs(300);

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Backend-assigned identifier.
    #[serde(alias = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
}

#[derive(Clone)]
enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
    Categories(Vec<Category>),
}

#[derive(Deserialize)]
struct ProductsEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Deserialize)]
struct ProductEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    product: Option<Product>,
}

#[derive(Deserialize)]
struct CategoriesEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    categories: Vec<Category>,
}

/// Catalog surface of the backend API.
///
/// Construct once and share; each instance owns its cache.
#[derive(Clone)]
pub struct CatalogApi {
    client: ApiClient,
    cache: Cache<String, CacheValue>,
}

impl CatalogApi {
    /// Create a catalog surface with a fresh cache.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();
        Self { client, cache }
    }

    /// List all products, optionally filtered by category slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn products(&self, category: Option<&str>) -> Result<Vec<Product>, ApiError> {
        let cache_key = format!("products:{}", category.unwrap_or(""));

        if let Some(CacheValue::Products(products)) = self.cache.get(&cache_key).await {
            debug!("cache hit for products");
            return Ok(products);
        }

        let path = category.map_or_else(
            || "/products".to_owned(),
            |slug| format!("/products?category={slug}"),
        );
        let envelope: ProductsEnvelope = self.client.get(&path).await?;
        ensure_success(envelope.success, envelope.message)?;

        self.cache
            .insert(cache_key, CacheValue::Products(envelope.products.clone()))
            .await;

        Ok(envelope.products)
    }

    /// Get a single product by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] if the product does not exist and
    /// transport-level errors otherwise.
    #[instrument(skip(self), fields(product = %id))]
    pub async fn product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let cache_key = format!("product:{id}");

        if let Some(CacheValue::Product(product)) = self.cache.get(&cache_key).await {
            debug!("cache hit for product");
            return Ok(*product);
        }

        let envelope: ProductEnvelope = self.client.get(&format!("/products/{id}")).await?;
        ensure_success(envelope.success, envelope.message)?;
        let product = envelope
            .product
            .ok_or_else(|| ApiError::Rejected(format!("Product not found: {id}")))?;

        self.cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let cache_key = "categories".to_owned();

        if let Some(CacheValue::Categories(categories)) = self.cache.get(&cache_key).await {
            debug!("cache hit for categories");
            return Ok(categories);
        }

        let envelope: CategoriesEnvelope = self.client.get("/categories").await?;
        ensure_success(envelope.success, envelope.message)?;

        self.cache
            .insert(
                cache_key,
                CacheValue::Categories(envelope.categories.clone()),
            )
            .await;

        Ok(envelope.categories)
    }

    /// Invalidate all cached catalog data.
    pub async fn invalidate_all(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }
}
