use serde::Deserialize;

use crate::engine::QueryConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub query: QuerySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub max_pool_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuerySettings {
    /// Hard cap on rollup rows returned by one tier query.
    #[serde(default = "default_row_cap")]
    pub row_cap: u32,
    /// Substitute recent data when a requested range has none.
    #[serde(default = "default_fallback_enabled")]
    pub fallback_enabled: bool,
    /// Most recent rows returned by the fallback.
    #[serde(default = "default_fallback_limit")]
    pub fallback_limit: u32,
    /// Largest queryable window accepted by the HTTP layer.
    #[serde(default = "default_max_window_days")]
    pub max_window_days: u32,
}

fn default_row_cap() -> u32 {
    10_000
}

fn default_fallback_enabled() -> bool {
    true
}

fn default_fallback_limit() -> u32 {
    100
}

fn default_max_window_days() -> u32 {
    30
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            row_cap: default_row_cap(),
            fallback_enabled: default_fallback_enabled(),
            fallback_limit: default_fallback_limit(),
            max_window_days: default_max_window_days(),
        }
    }
}

impl QuerySettings {
    pub fn to_query_config(&self) -> QueryConfig {
        QueryConfig {
            row_cap: self.row_cap,
            fallback_enabled: self.fallback_enabled,
            fallback_limit: self.fallback_limit,
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.database.path.is_empty(),
            "database.path must be non-empty"
        );
        anyhow::ensure!(
            self.database.max_pool_size > 0,
            "database.max_pool_size must be > 0, got {}",
            self.database.max_pool_size
        );
        anyhow::ensure!(
            self.query.row_cap > 0,
            "query.row_cap must be > 0, got {}",
            self.query.row_cap
        );
        anyhow::ensure!(
            self.query.fallback_limit > 0,
            "query.fallback_limit must be > 0, got {}",
            self.query.fallback_limit
        );
        anyhow::ensure!(
            self.query.max_window_days > 0,
            "query.max_window_days must be > 0, got {}",
            self.query.max_window_days
        );
        Ok(())
    }
}
