//! Categories Domain
//!
//! Name-keyed categories that products reference.
//!
//! ```text
//! handlers  → HTTP endpoints (axum)
//! service   → blank-name check, get-or-create
//! repository→ trait + SQLite implementation (SeaORM)
//! entity    → `categories` table
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_categories::{handlers, CategoryService, SqliteCategoryRepository};
//!
//! # async fn example(db: sea_orm::DatabaseConnection) {
//! domain_categories::init_schema(&db).await.unwrap();
//! let service = CategoryService::new(SqliteCategoryRepository::new(db));
//! let router = handlers::router(service);
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod sqlite;

pub use error::{CategoryError, CategoryResult};
pub use handlers::ApiDoc;
pub use models::{Category, CreateCategory};
pub use repository::CategoryRepository;
pub use service::CategoryService;
pub use sqlite::{SqliteCategoryRepository, init_schema};
