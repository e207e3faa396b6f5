use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use std::time::Instant;
use tracing::debug;

use crate::common::DatabaseError;

/// Run `SELECT 1` against the pool.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    debug!("Running SQLite health check");

    let stmt = Statement::from_string(DatabaseBackend::Sqlite, "SELECT 1".to_owned());
    db.query_one_raw(stmt).await.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!("SQLite health check failed: {}", e))
    })?;

    Ok(())
}

#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    pub message: Option<String>,
    pub response_time_ms: u64,
}

/// [`check_health`] with timing, for readiness reporting.
pub async fn check_health_detailed(db: &DatabaseConnection) -> HealthStatus {
    let start = Instant::now();
    let result = check_health(db).await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    HealthStatus {
        healthy: result.is_ok(),
        message: result.err().map(|e| e.to_string()),
        response_time_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::connect;

    #[tokio::test]
    async fn test_check_health_on_open_pool() {
        let db = connect("sqlite::memory:").await.unwrap();
        assert!(check_health(&db).await.is_ok());

        let status = check_health_detailed(&db).await;
        assert!(status.healthy);
        assert!(status.message.is_none());
    }

    #[tokio::test]
    async fn test_check_health_after_close() {
        let db = connect("sqlite::memory:").await.unwrap();
        let handle = db.clone();
        db.close().await.unwrap();

        let status = check_health_detailed(&handle).await;
        assert!(!status.healthy);
        assert!(status.message.unwrap().contains("health check failed"));
    }
}
