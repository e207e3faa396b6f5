use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{NewProduct, Product, ProductChanges, ProductFilter};

/// Persistence for products.
///
/// Implementations enforce, atomically with the write:
/// - the case-insensitive name is unique (`DuplicateName`)
/// - the referenced category exists (`CategoryNotFound`)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Matching products in insertion order.
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    /// Apply `changes`; `NotFound` when `id` is absent.
    async fn update(&self, id: i32, changes: ProductChanges) -> ProductResult<Product>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> ProductResult<bool>;
}
