use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductChanges;
use crate::domain::product::models::ProductId;
use crate::domain::product::ports::ProductRepository;
use crate::domain::product::ports::ProductServicePort;
use crate::domain::product::update::UpdateResolver;

/// Domain service implementation for product operations.
pub struct ProductService<PR>
where
    PR: ProductRepository,
{
    repository: Arc<PR>,
    resolver: UpdateResolver,
}

impl<PR> ProductService<PR>
where
    PR: ProductRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self {
            repository,
            resolver: UpdateResolver::new(),
        }
    }
}

#[async_trait]
impl<PR> ProductServicePort for ProductService<PR>
where
    PR: ProductRepository,
{
    async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        let products = self.repository.list_all().await?;
        tracing::debug!(count = products.len(), "Products fetched");
        Ok(products)
    }

    async fn search_products(&self, name: &str) -> Result<Vec<Product>, ProductError> {
        Ok(self.repository.search_by_name(name).await?)
    }

    async fn update_product(&self, id: &str, payload: Value) -> Result<Product, ProductError> {
        let changes = ProductChanges::from_payload(payload)?;
        tracing::debug!(product_id = %id, changes = ?changes, "Sanitized update");

        let repository = self.repository.as_ref();
        let target = self.resolver.resolve_target(repository, id).await?;

        self.resolver.apply(repository, &target, &changes).await
    }

    async fn delete_product(&self, id: &str) -> Result<bool, ProductError> {
        let deleted = self
            .repository
            .delete(&ProductId::from_string(id))
            .await?;

        tracing::info!(product_id = %id, deleted, "Product delete requested");

        Ok(deleted)
    }
}
