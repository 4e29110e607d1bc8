use std::env;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha512};
use time::Duration;
use tower_sessions::{
    cookie::{Key, SameSite},
    service::SignedCookie,
    Expiry, SessionManagerLayer,
};
use tower_sessions_sqlx_store::SqliteStore;
use tracing::warn;

use super::{env_flag_enabled, is_production, looks_like_default, ConfigError};

/// Convenience alias for the signed session layer produced by `SessionConfig`.
pub type SessionLayer = SessionManagerLayer<SqliteStore, SignedCookie>;

/// Cookie settings for the administrator session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub expiry: Duration,
    pub name: String,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        if is_production() {
            Self::production()
        } else {
            Self::development()
        }
    }

    pub fn production() -> Self {
        SessionConfig {
            secure: true,
            http_only: true,
            same_site: SameSite::Strict,
            expiry: Duration::hours(2),
            name: "__Host-session".to_string(),
        }
    }

    pub fn development() -> Self {
        SessionConfig {
            secure: false,
            http_only: true,
            same_site: SameSite::Lax,
            expiry: Duration::days(7),
            name: "session".to_string(),
        }
    }

    pub fn create_layer(&self, store: SqliteStore) -> SessionLayer {
        self.create_layer_with_key(store, load_session_key())
    }

    pub fn create_layer_with_key(&self, store: SqliteStore, key: Key) -> SessionLayer {
        SessionManagerLayer::new(store)
            .with_secure(self.secure)
            .with_http_only(self.http_only)
            .with_same_site(self.same_site)
            .with_name(self.name.clone())
            .with_expiry(Expiry::OnInactivity(self.expiry))
            .with_signed(key)
    }
}

/// Refuses to start a production server with weak transport or secrets.
pub fn validate_production_config() -> Result<(), ConfigError> {
    if !is_production() {
        return Ok(());
    }

    if !env_flag_enabled("FORCE_HTTPS") {
        return Err(ConfigError::HttpsRequired);
    }

    let secret = env::var("SESSION_SECRET").map_err(|_| ConfigError::Missing("SESSION_SECRET"))?;
    if decode_secret_bytes(&secret).len() < 64 {
        return Err(ConfigError::SecretTooShort);
    }
    if looks_like_default(&secret) {
        return Err(ConfigError::DefaultValue("SESSION_SECRET"));
    }

    Ok(())
}

fn load_session_key() -> Key {
    match env::var("SESSION_SECRET") {
        Ok(secret) if !secret.is_empty() => {
            let bytes = decode_secret_bytes(&secret);
            key_from_secret_bytes(&bytes)
        }
        _ => {
            warn!("SESSION_SECRET not set; generating ephemeral key (development only)");
            Key::generate()
        }
    }
}

fn decode_secret_bytes(secret: &str) -> Vec<u8> {
    STANDARD
        .decode(secret.as_bytes())
        .unwrap_or_else(|_| secret.as_bytes().to_vec())
}

fn key_from_secret_bytes(bytes: &[u8]) -> Key {
    if bytes.len() >= 64 {
        Key::from(&bytes[..64])
    } else {
        let digest = Sha512::digest(bytes);
        Key::from(digest.as_slice())
    }
}
