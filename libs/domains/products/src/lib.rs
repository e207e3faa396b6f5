//! Products Domain
//!
//! Products are name-keyed (case-insensitive), priced, optionally
//! age-restricted, and belong to a category from `domain_categories`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │    Handlers     │  ← HTTP layer (axum)
//! ├─────────────────┤
//! │    Service      │  ← price coercion, required fields
//! ├─────────────────┤
//! │   Repository    │  ← uniqueness + category checks in one transaction
//! ├─────────────────┤
//! │     SQLite      │  ← SeaORM entity over the `products` table
//! └─────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, ProductService, SqliteProductRepository};
//!
//! # async fn example(db: sea_orm::DatabaseConnection) {
//! domain_categories::init_schema(&db).await.unwrap();
//! domain_products::init_schema(&db).await.unwrap();
//!
//! let service = ProductService::new(SqliteProductRepository::new(db));
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

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{CreateProduct, Product, ProductFilter, UpdateProduct};
pub use repository::ProductRepository;
pub use service::ProductService;
pub use sqlite::{SqliteProductRepository, init_schema};
