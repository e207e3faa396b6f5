use async_trait::async_trait;

use crate::error::CategoryResult;
use crate::models::Category;

/// Persistence for categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a category; fails with `DuplicateName` if the exact name exists.
    async fn create(&self, name: String) -> CategoryResult<Category>;

    async fn get_by_id(&self, id: i32) -> CategoryResult<Option<Category>>;

    /// All categories in insertion order.
    async fn list(&self) -> CategoryResult<Vec<Category>>;

    /// Existing category with this exact name, or a newly inserted one.
    async fn get_or_create(&self, name: String) -> CategoryResult<Category>;
}
