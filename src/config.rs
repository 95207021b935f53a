use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),

    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

/// Process configuration, read once at startup. Every component gets its
/// piece of this through its constructor; nothing reads the environment
/// after boot.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub provider_api_url: String,
    pub provider_api_key: String,
    pub update_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let minutes: u64 = required("UPDATE_TIME_IN_MINUTES")?
            .parse()
            .map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid("UPDATE_TIME_IN_MINUTES", e.to_string())
            })?;
        if minutes == 0 {
            return Err(ConfigError::Invalid(
                "UPDATE_TIME_IN_MINUTES",
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            server_address: required("SERVER_ADDRESS")?,
            database_url: required("DATABASE_URL")?,
            provider_api_url: required("PROVIDER_API_URL")?,
            provider_api_key: required("PROVIDER_API_KEY")?,
            update_interval: Duration::from_secs(minutes * 60),
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::Missing(name))
}
