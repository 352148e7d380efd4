use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Where user records live
#[derive(Clone, Debug)]
pub enum StoreBackend {
    /// Process-local store seeded with sample users; lost on restart
    Memory,
    Postgres(PostgresConfig),
}

impl FromEnv for StoreBackend {
    /// `USER_STORE=memory` (default) or `USER_STORE=postgres`, which also
    /// requires `DATABASE_URL`.
    fn from_env() -> Result<Self, ConfigError> {
        let store = env_or_default("USER_STORE", "memory");

        match store.to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres(PostgresConfig::from_env()?)),
            other => Err(ConfigError::ParseError {
                key: "USER_STORE".to_string(),
                details: format!("expected 'memory' or 'postgres', got '{}'", other),
            }),
        }
    }
}

/// Application-specific configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub store: StoreBackend,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let store = StoreBackend::from_env()?;

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            store,
        })
    }
}
