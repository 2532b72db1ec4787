//! Relay configuration loaded from the environment.

use std::path::PathBuf;

/// Configuration for the relay process.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Discord webhook URL the sink forwards to.
    pub webhook_url: String,

    /// Host the HTTP server binds to.
    pub host: String,

    /// Port the HTTP server listens on.
    pub port: u16,

    /// Directory holding the durable endpoint token record.
    pub cache_dir: PathBuf,
}

impl RelayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_reader(|key| std::env::var(key))
    }

    /// Load configuration from a custom variable reader.
    ///
    /// This allows tests to supply variables without mutating process-global
    /// environment state.
    pub fn from_reader<F>(reader: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let webhook_url = reader("DISCORD_WEBHOOK_URL")
            .map_err(|_| ConfigError::MissingVar("DISCORD_WEBHOOK_URL".into()))?;

        let host = reader("RELAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = reader("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidValue("PORT".into(), e.to_string()))?;

        let cache_dir = reader("RELAY_CACHE_DIR")
            .unwrap_or_else(|_| "./cache".to_string())
            .into();

        Ok(Self {
            webhook_url,
            host,
            port,
            cache_dir,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(String),

    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}
