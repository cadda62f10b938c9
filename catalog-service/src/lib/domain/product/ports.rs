use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::RepositoryError;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::StoredProduct;

/// Port for product catalog operations.
#[async_trait]
pub trait ProductServicePort: Send + Sync + 'static {
    /// List every product in the catalog.
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn list_products(&self) -> Result<Vec<Product>, ProductError>;

    /// Case-insensitive substring search on product names.
    ///
    /// An empty query matches every product.
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn search_products(&self, name: &str) -> Result<Vec<Product>, ProductError>;

    /// Apply a raw partial update to a product.
    ///
    /// # Arguments
    /// * `id` - Product ID as received from the client
    /// * `payload` - Raw JSON payload; sanitized and whitelisted before use
    ///
    /// # Returns
    /// Updated product as persisted
    ///
    /// # Errors
    /// * `InvalidPayload` - Payload is not an object or carries a bad price
    /// * `NotFound` - No product with this ID
    /// * `UpdateFailed` - Every update strategy failed
    /// * `Database` - Lookup failed
    async fn update_product(&self, id: &str, payload: Value) -> Result<Product, ProductError>;

    /// Delete a product.
    ///
    /// # Returns
    /// Whether a document was deleted
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn delete_product(&self, id: &str) -> Result<bool, ProductError>;
}

/// Persistence operations for the product collection.
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    /// Query by storage key.
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Full collection scan.
    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError>;

    /// Full collection scan keeping each record's storage key.
    async fn list_stored(&self) -> Result<Vec<StoredProduct>, RepositoryError>;

    /// Case-insensitive substring match on `name`.
    async fn search_by_name(&self, name: &str) -> Result<Vec<Product>, RepositoryError>;

    /// Save a product over the document stored under `key`.
    ///
    /// # Errors
    /// * `Missing` - No document under this key
    /// * `Database` - Store operation failed
    async fn save(&self, key: &ProductId, product: &Product) -> Result<(), RepositoryError>;

    /// Insert a new product document.
    ///
    /// # Errors
    /// * `Duplicate` - A document with this ID exists
    /// * `Database` - Store operation failed
    async fn insert(&self, product: &Product) -> Result<(), RepositoryError>;

    /// Delete by storage key.
    ///
    /// # Returns
    /// Whether a document was removed
    async fn delete(&self, id: &ProductId) -> Result<bool, RepositoryError>;
}
