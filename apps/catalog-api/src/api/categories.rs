//! Categories API routes

use axum::Router;
use domain_categories::{CategoryService, SqliteCategoryRepository, handlers};
use tracing::info;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = SqliteCategoryRepository::new(state.db.clone());
    let service = CategoryService::new(repository);
    handlers::router(service)
}

pub async fn init_schema(state: &AppState) -> eyre::Result<()> {
    domain_categories::init_schema(&state.db).await?;
    Ok(())
}

/// Ensure the configured seed category exists.
pub async fn seed(state: &AppState) -> eyre::Result<()> {
    let Some(name) = state.config.seed_category.as_deref() else {
        return Ok(());
    };

    let service = CategoryService::new(SqliteCategoryRepository::new(state.db.clone()));
    let category = service.get_or_create(name).await?;

    info!(category_id = category.id, name = %category.name, "Seed category ready");
    Ok(())
}
