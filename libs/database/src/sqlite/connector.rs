use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::{error, info};

use super::SqliteConfig;
use crate::common::{RetryConfig, retry, retry_with_backoff};

/// Connect with [`SqliteConfig`] defaults for `database_url`.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    connect_from_config(SqliteConfig::new(database_url)).await
}

pub async fn connect_from_config(config: SqliteConfig) -> Result<DatabaseConnection, DbErr> {
    connect_with_options(config.into_connect_options()).await
}

pub async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!("Successfully connected to SQLite database");
    Ok(db)
}

/// Connect, retrying transient failures with exponential backoff.
///
/// ```ignore
/// let config = SqliteConfig::from_env()?;
/// let db = connect_from_config_with_retry(config, Some(RetryConfig::new().with_max_retries(5))).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: SqliteConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    let options = config.into_connect_options();
    let attempt = || connect_with_options(options.clone());

    match retry_config {
        Some(policy) => retry_with_backoff(attempt, policy).await,
        None => retry(attempt).await,
    }
}

/// Close the pool, logging the outcome. Used as a shutdown cleanup task.
pub async fn close(db: DatabaseConnection) {
    match db.close().await {
        Ok(()) => info!("SQLite connection pool closed"),
        Err(e) => error!("Error closing SQLite connection pool: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ConnectionTrait;

    #[tokio::test]
    async fn test_connect_in_memory() {
        let db = connect("sqlite::memory:").await.unwrap();
        db.execute_unprepared("CREATE TABLE t (id INTEGER PRIMARY KEY)")
            .await
            .unwrap();
        db.execute_unprepared("INSERT INTO t (id) VALUES (1)")
            .await
            .unwrap();
        close(db).await;
    }

    #[tokio::test]
    async fn test_in_memory_schema_survives_across_statements() {
        let db = connect_from_config_with_retry(
            SqliteConfig::new("sqlite::memory:"),
            Some(RetryConfig::new().with_max_retries(0)),
        )
        .await
        .unwrap();

        db.execute_unprepared("CREATE TABLE t (id INTEGER PRIMARY KEY)")
            .await
            .unwrap();
        for _ in 0..5 {
            db.execute_unprepared("INSERT INTO t DEFAULT VALUES")
                .await
                .unwrap();
        }
    }
}
