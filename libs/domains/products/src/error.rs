use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(i32),

    #[error("Product with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Price must be a number")]
    InvalidPrice,

    #[error("Category {0} does not exist")]
    CategoryNotFound(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound("Product not found".to_string()),
            ProductError::DuplicateName(_) => {
                AppError::Duplicate("Product with this name already exists".to_string())
            }
            ProductError::InvalidPrice => AppError::BadRequest(err.to_string()),
            ProductError::CategoryNotFound(_) => AppError::BadRequest(err.to_string()),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
