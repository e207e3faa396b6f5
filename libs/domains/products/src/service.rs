//! Product Service - field coercion and validation before persistence

use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, NewProduct, Product, ProductChanges, ProductFilter, UpdateProduct, parse_price,
};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Checks run in a fixed order (price, name, category) and all of them
/// complete before the repository is called.
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        let price = input
            .price
            .as_ref()
            .ok_or(ProductError::InvalidPrice)
            .and_then(parse_price)?;
        let name = require_name(input.name)?;
        let category_id = input
            .category
            .ok_or_else(|| ProductError::Validation("Category is required".to_string()))?;

        self.repository
            .create(NewProduct {
                name,
                price,
                is_18_plus: input.is_18_plus.unwrap_or(false),
                category_id,
            })
            .await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        self.repository.list(filter).await
    }

    /// Apply a partial update
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        let price = input.price.as_ref().map(parse_price).transpose()?;
        let name = input.name.map(require_name).transpose()?;

        self.repository
            .update(
                id,
                ProductChanges {
                    name,
                    price,
                    is_18_plus: input.is_18_plus,
                    category_id: input.category,
                },
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(ProductError::NotFound(id))
        }
    }
}

fn require_name(name: String) -> ProductResult<String> {
    if name.trim().is_empty() {
        return Err(ProductError::Validation(
            "Name must not be empty".to_string(),
        ));
    }
    Ok(name)
}
