//! Configuration for the Catalog API

use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::sqlite::SqliteConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: SqliteConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Category ensured at startup via get-or-create (`SEED_CATEGORY`)
    pub seed_category: Option<String>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = SqliteConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        let seed_category = std::env::var("SEED_CATEGORY")
            .ok()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            seed_category,
        })
    }
}
