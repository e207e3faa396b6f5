use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or_default};
use sea_orm::ConnectOptions;
use std::time::Duration;

/// Default on-disk database, created on first use.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://catalog.db?mode=rwc";

/// Lifetime long enough that pooled in-memory connections are never recycled.
const PINNED: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// SQLite connection pool settings.
///
/// ```ignore
/// use database::sqlite::SqliteConfig;
///
/// let config = SqliteConfig::new("sqlite::memory:");
/// let db = database::sqlite::connect_from_config(config).await?;
/// ```
#[derive(Clone, Debug)]
pub struct SqliteConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    /// Log every statement through sqlx
    pub sqlx_logging: bool,
}

impl SqliteConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Whether the URL points at a private in-memory database.
    ///
    /// Every pooled connection to such a URL opens its own empty database.
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }

    /// Convert into SeaORM options.
    ///
    /// In-memory URLs are pinned to one connection that is never closed for
    /// idleness or age, so the schema and data survive for the pool's lifetime.
    pub fn into_connect_options(self) -> ConnectOptions {
        let in_memory = self.is_in_memory();
        let mut opt = ConnectOptions::new(&self.url);
        opt.connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .sqlx_logging(self.sqlx_logging);

        if in_memory {
            opt.max_connections(1)
                .min_connections(1)
                .idle_timeout(PINNED)
                .max_lifetime(PINNED);
        } else {
            opt.max_connections(self.max_connections)
                .min_connections(self.min_connections)
                .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
                .max_lifetime(Duration::from_secs(self.max_lifetime_secs));
        }
        opt
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 8,
            acquire_timeout_secs: 8,
            idle_timeout_secs: 300,
            max_lifetime_secs: 1800,
            sqlx_logging: false,
        }
    }
}

/// Environment variables:
/// - `DATABASE_URL` (default: `sqlite://catalog.db?mode=rwc`)
/// - `DB_MAX_CONNECTIONS` (default: 5)
/// - `DB_MIN_CONNECTIONS` (default: 1)
/// - `DB_CONNECT_TIMEOUT_SECS` (default: 8)
/// - `DB_ACQUIRE_TIMEOUT_SECS` (default: 8)
/// - `DB_SQLX_LOGGING` (default: false)
impl FromEnv for SqliteConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            url: env_or_default("DATABASE_URL", DEFAULT_DATABASE_URL),
            max_connections: env_parse_or_default("DB_MAX_CONNECTIONS", "5")?,
            min_connections: env_parse_or_default("DB_MIN_CONNECTIONS", "1")?,
            connect_timeout_secs: env_parse_or_default("DB_CONNECT_TIMEOUT_SECS", "8")?,
            acquire_timeout_secs: env_parse_or_default("DB_ACQUIRE_TIMEOUT_SECS", "8")?,
            sqlx_logging: env_parse_or_default("DB_SQLX_LOGGING", "false")?,
            ..defaults
        })
    }
}
