use std::env;

use tracing::warn;

use super::{is_production, looks_like_default, ConfigError};

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEVELOPMENT_ADMIN_PASSWORD: &str = "password";

/// Credentials for the administrator created on first startup.
#[derive(Clone)]
pub struct AdminSeedConfig {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AdminSeedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeedConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AdminSeedConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let username = env::var("ADMIN_USERNAME")
            .ok()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.to_string());

        let password = match env::var("ADMIN_PASSWORD") {
            Ok(password) if !password.is_empty() => {
                if is_production() && looks_like_default(&password) {
                    return Err(ConfigError::DefaultValue("ADMIN_PASSWORD"));
                }
                password
            }
            _ if is_production() => return Err(ConfigError::Missing("ADMIN_PASSWORD")),
            _ => {
                warn!("ADMIN_PASSWORD not set; seeding with the development password");
                DEVELOPMENT_ADMIN_PASSWORD.to_string()
            }
        };

        Ok(Self { username, password })
    }
}
