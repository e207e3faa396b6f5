//! API routes module

pub mod categories;
pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/categories", categories::router(state))
        .nest("/products", products::router(state))
        .merge(health::router(state.clone()))
}

/// Create tables (idempotent) and apply seed data.
pub async fn bootstrap(state: &AppState) -> eyre::Result<()> {
    categories::init_schema(state).await?;
    products::init_schema(state).await?;
    categories::seed(state).await
}
