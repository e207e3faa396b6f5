use std::sync::Arc;
use tracing::instrument;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CreateCategory};
use crate::repository::CategoryRepository;

/// Service layer for category rules
#[derive(Clone)]
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a category; blank names are rejected before persistence.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_category(&self, input: CreateCategory) -> CategoryResult<Category> {
        let name = require_name(input.name)?;
        self.repository.create(name).await
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> CategoryResult<Vec<Category>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: i32) -> CategoryResult<Category> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound(id))
    }

    /// Used by startup seeding and test fixtures.
    #[instrument(skip(self))]
    pub async fn get_or_create(&self, name: &str) -> CategoryResult<Category> {
        let name = require_name(name.to_string())?;
        self.repository.get_or_create(name).await
    }
}

fn require_name(name: String) -> CategoryResult<String> {
    if name.trim().is_empty() {
        return Err(CategoryError::Validation(
            "Name must not be empty".to_string(),
        ));
    }
    Ok(name)
}
