//! Products API routes

use axum::Router;
use domain_products::{ProductService, SqliteProductRepository, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = SqliteProductRepository::new(state.db.clone());
    let service = ProductService::new(repository);
    handlers::router(service)
}

/// Requires the categories table to exist first.
pub async fn init_schema(state: &AppState) -> eyre::Result<()> {
    domain_products::init_schema(&state.db).await?;
    Ok(())
}
