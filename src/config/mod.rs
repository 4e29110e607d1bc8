pub mod bootstrap;
pub mod server;
pub mod session;

use std::env;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("production requires HTTPS, set FORCE_HTTPS=true")]
    HttpsRequired,
    #[error("{0} must be set in production")]
    Missing(&'static str),
    #[error("SESSION_SECRET must be at least 64 bytes in production")]
    SecretTooShort,
    #[error("{0} looks like a default value, generate a real one")]
    DefaultValue(&'static str),
    #[error("invalid {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

pub fn current_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string())
}

pub fn is_production() -> bool {
    current_environment() == "production"
}

pub fn env_flag_enabled(key: &str) -> bool {
    env::var(key)
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "True"))
        .unwrap_or(false)
}

pub(crate) fn looks_like_default(value: &str) -> bool {
    let lowered = value.to_ascii_lowercase();
    lowered.contains("example") || lowered.contains("changeme") || lowered.contains("default")
}
