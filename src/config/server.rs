use std::env;

use super::ConfigError;

/// Listen address and database location.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
        let port = port
            .parse::<u16>()
            .map_err(|_| ConfigError::Invalid { name: "PORT", value: port })?;
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://salon.db".to_string());

        Ok(Self {
            host,
            port,
            database_url,
        })
    }
}
