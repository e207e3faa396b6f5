//! SQLite connector built on SeaORM's sqlx driver.

mod config;
mod connector;
mod health;

pub use config::{DEFAULT_DATABASE_URL, SqliteConfig};
pub use connector::{
    close, connect, connect_from_config, connect_from_config_with_retry, connect_with_options,
};
pub use health::{HealthStatus, check_health, check_health_detailed};

pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
