use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::domain::errors::RepositoryError;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::StoredProduct;
use crate::domain::product::ports::ProductRepository;
use crate::outbound::store::Collection;
use crate::outbound::store::PostgresDocumentStore;

/// Stored shape of a product document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct ProductDocument {
    id: String,
    name: String,
    price: f64,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    in_stock: Option<bool>,
}

impl From<&Product> for ProductDocument {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price,
            category: product.category.clone(),
            in_stock: product.in_stock,
        }
    }
}

impl From<ProductDocument> for Product {
    fn from(document: ProductDocument) -> Self {
        Self {
            id: ProductId::from_string(document.id),
            name: document.name,
            price: document.price,
            category: document.category,
            in_stock: document.in_stock,
        }
    }
}

fn encode(product: &Product) -> Result<Value, RepositoryError> {
    serde_json::to_value(ProductDocument::from(product))
        .map_err(|e| RepositoryError::Corrupt(e.to_string()))
}

fn decode(document: Value) -> Result<Product, RepositoryError> {
    serde_json::from_value::<ProductDocument>(document)
        .map(Product::from)
        .map_err(|e| RepositoryError::Corrupt(e.to_string()))
}

pub struct PostgresProductRepository {
    store: PostgresDocumentStore,
}

impl PostgresProductRepository {
    pub fn new(store: PostgresDocumentStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        self.store
            .find_by_id(Collection::Products, id.as_str())
            .await?
            .map(decode)
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        self.store
            .scan(Collection::Products)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    async fn list_stored(&self) -> Result<Vec<StoredProduct>, RepositoryError> {
        self.store
            .scan_keyed(Collection::Products)
            .await?
            .into_iter()
            .map(|(key, document)| {
                Ok(StoredProduct {
                    key: ProductId::from_string(key),
                    product: decode(document)?,
                })
            })
            .collect()
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<Product>, RepositoryError> {
        self.store
            .search_contains(Collection::Products, "name", name)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    async fn save(&self, key: &ProductId, product: &Product) -> Result<(), RepositoryError> {
        self.store
            .replace(Collection::Products, key.as_str(), &encode(product)?)
            .await
    }

    async fn insert(&self, product: &Product) -> Result<(), RepositoryError> {
        self.store
            .insert(Collection::Products, product.id.as_str(), &encode(product)?)
            .await
    }

    async fn delete(&self, id: &ProductId) -> Result<bool, RepositoryError> {
        self.store.delete(Collection::Products, id.as_str()).await
    }
}
