//! Bootstrap configuration.
//!
//! Read once at startup from environment variables with the `DIVE_PORTAL`
//! prefix; nested values use `__` as separator. Runtime portal settings
//! live in the database and are served by
//! [`ConfigurationStore`](crate::application::ConfigurationStore).
//!
//! ```no_run
//! use dive_portal::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

const ENV_PREFIX: &str = "DIVE_PORTAL";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Loads `.env` if present, then reads the environment.
    ///
    /// - `DIVE_PORTAL__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `DIVE_PORTAL__DATABASE__URL=...` -> `database.url = ...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
