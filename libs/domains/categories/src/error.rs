use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Category not found: {0}")]
    NotFound(i32),

    #[error("Category with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type CategoryResult<T> = Result<T, CategoryError>;

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(_) => AppError::NotFound("Category not found".to_string()),
            CategoryError::DuplicateName(_) => {
                AppError::Duplicate("Category with this name already exists".to_string())
            }
            CategoryError::Validation(msg) => AppError::BadRequest(msg),
            CategoryError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for CategoryError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
