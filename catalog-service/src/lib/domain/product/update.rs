//! Product update resolution.
//!
//! An update first locates its target (by id, then by scanning string ids),
//! then runs a fixed chain of strategies until one persists the change:
//!
//! 1. [`InPlaceSave`] mutates the resolved record and saves it over the
//!    existing document.
//! 2. [`ReplaceDocument`] deletes the document and inserts a freshly built
//!    record with the same id, for stores that refuse in-place writes.
//!
//! Both strategies address the record by the storage key it was resolved
//! under, which may differ from its `id` when the scan found it.
//!
//! Each failure is recorded; if the chain is exhausted the caller gets
//! [`ProductError::UpdateFailed`] listing every cause.

use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::product::errors::ProductError;
use crate::domain::product::errors::StrategyFailure;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductChanges;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::StoredProduct;
use crate::domain::product::ports::ProductRepository;

/// One way of persisting a product update.
#[async_trait]
pub trait UpdateStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Persist `changes` applied to `target`, returning the stored record.
    async fn apply(
        &self,
        repository: &dyn ProductRepository,
        target: &StoredProduct,
        changes: &ProductChanges,
    ) -> Result<Product, RepositoryError>;
}

/// Mutate the resolved record and save it in place.
pub struct InPlaceSave;

#[async_trait]
impl UpdateStrategy for InPlaceSave {
    fn name(&self) -> &'static str {
        "in_place_save"
    }

    async fn apply(
        &self,
        repository: &dyn ProductRepository,
        target: &StoredProduct,
        changes: &ProductChanges,
    ) -> Result<Product, RepositoryError> {
        let mut product = target.product.clone();
        changes.apply_to(&mut product);

        repository.save(&target.key, &product).await?;

        Ok(product)
    }
}

/// Delete the old document and insert a merged record under the same id.
pub struct ReplaceDocument;

#[async_trait]
impl UpdateStrategy for ReplaceDocument {
    fn name(&self) -> &'static str {
        "replace_document"
    }

    async fn apply(
        &self,
        repository: &dyn ProductRepository,
        target: &StoredProduct,
        changes: &ProductChanges,
    ) -> Result<Product, RepositoryError> {
        let current = &target.product;
        let replacement = changes.merged(current);

        // Inserting without a successful delete would leave two records.
        if !repository.delete(&target.key).await? {
            return Err(RepositoryError::Missing(target.key.to_string()));
        }

        if let Err(e) = repository.insert(&replacement).await {
            // Put the previous document back so a failed replace loses nothing.
            if let Err(restore) = repository.insert(current).await {
                tracing::error!(
                    product_id = %current.id,
                    error = %restore,
                    "Failed to restore product after aborted replace"
                );
            }
            return Err(e);
        }

        Ok(replacement)
    }
}

/// Locates update targets and runs the strategy chain.
pub struct UpdateResolver {
    strategies: Vec<Box<dyn UpdateStrategy>>,
}

impl UpdateResolver {
    /// Resolver with the standard chain: in-place save, then replace.
    pub fn new() -> Self {
        Self::with_strategies(vec![Box::new(InPlaceSave), Box::new(ReplaceDocument)])
    }

    pub fn with_strategies(strategies: Vec<Box<dyn UpdateStrategy>>) -> Self {
        Self { strategies }
    }

    /// Find the product to update.
    ///
    /// Falls back to a full scan comparing string ids when the direct lookup
    /// misses, so records whose stored key differs in representation are
    /// still reachable.
    ///
    /// # Errors
    /// * `NotFound` - Neither lookup matched
    /// * `Database` - Store operation failed
    pub async fn resolve_target(
        &self,
        repository: &dyn ProductRepository,
        raw_id: &str,
    ) -> Result<StoredProduct, ProductError> {
        let key = ProductId::from_string(raw_id);

        if let Some(product) = repository.find_by_id(&key).await? {
            return Ok(StoredProduct { key, product });
        }

        tracing::debug!(product_id = %raw_id, "Direct lookup missed, scanning products");

        repository
            .list_stored()
            .await?
            .into_iter()
            .find(|stored| stored.product.id.to_string() == raw_id)
            .ok_or_else(|| ProductError::NotFound(raw_id.to_string()))
    }

    /// Run the strategies in order until one succeeds.
    ///
    /// # Errors
    /// * `UpdateFailed` - Every strategy failed; causes in the order tried
    pub async fn apply(
        &self,
        repository: &dyn ProductRepository,
        target: &StoredProduct,
        changes: &ProductChanges,
    ) -> Result<Product, ProductError> {
        let mut attempts = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            match strategy.apply(repository, target, changes).await {
                Ok(updated) => {
                    tracing::info!(
                        product_id = %updated.id,
                        strategy = strategy.name(),
                        "Product updated"
                    );
                    return Ok(updated);
                }
                Err(cause) => {
                    tracing::warn!(
                        product_id = %target.product.id,
                        storage_key = %target.key,
                        strategy = strategy.name(),
                        error = %cause,
                        "Update strategy failed"
                    );
                    attempts.push(StrategyFailure {
                        strategy: strategy.name(),
                        cause,
                    });
                }
            }
        }

        Err(ProductError::UpdateFailed { attempts })
    }
}

impl Default for UpdateResolver {
    fn default() -> Self {
        Self::new()
    }
}
