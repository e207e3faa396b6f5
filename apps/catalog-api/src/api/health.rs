//! Readiness endpoint

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use tracing::debug;

use crate::state::AppState;

async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let database: HealthCheckFuture<'_> = Box::pin(async {
        let status = database::sqlite::check_health_detailed(&state.db).await;
        debug!(response_time_ms = status.response_time_ms, "Database probe");

        if status.healthy {
            Ok(())
        } else {
            Err(status.message.unwrap_or_default())
        }
    });

    run_health_checks(vec![("database", database)]).await
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(state)
}
