//! Database connection management for the catalog services.
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::sqlite::{SqliteConfig, connect_from_config_with_retry};
//! use database::common::RetryConfig;
//!
//! let config = SqliteConfig::from_env()?;
//! let db = connect_from_config_with_retry(config, Some(RetryConfig::new().with_max_retries(5))).await?;
//! database::sqlite::check_health(&db).await?;
//! ```

pub mod common;
pub mod sqlite;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
