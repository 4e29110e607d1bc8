use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::{debug, warn};
use uuid::Uuid;

pub const CSRF_TOKEN_KEY: &str = "csrf_token";

/// Tokens older than this are refused and replaced.
const CSRF_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// CSRF token as kept in the session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrfToken {
    pub value: String,
    pub created_at: i64,
}

impl CsrfToken {
    pub fn new() -> Self {
        Self {
            value: Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp() - self.created_at > CSRF_TOKEN_TTL_SECS
    }
}

impl Default for CsrfToken {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CsrfError {
    #[error("no CSRF token in session")]
    Missing,
    #[error("CSRF token expired")]
    Expired,
    #[error("CSRF token mismatch")]
    Mismatch,
    #[error("session store unavailable")]
    Session,
}

// Never log a whole token.
fn token_prefix(token: &str) -> &str {
    token.get(..8).unwrap_or(token)
}

/// Generate a new CSRF token and store it in the session
pub async fn generate_csrf_token(
    session: &Session,
) -> Result<String, tower_sessions::session::Error> {
    let token = CsrfToken::new();
    let value = token.value.clone();

    session.insert(CSRF_TOKEN_KEY, token).await?;

    debug!("Generated new CSRF token: {}", token_prefix(&value));
    Ok(value)
}

/// Get or create a CSRF token for the session
pub async fn get_or_create_csrf_token(
    session: &Session,
) -> Result<String, tower_sessions::session::Error> {
    let token: Option<CsrfToken> = session.get(CSRF_TOKEN_KEY).await?;

    match token {
        Some(existing_token) if !existing_token.is_expired() => Ok(existing_token.value),
        _ => generate_csrf_token(session).await,
    }
}

/// Checks a token posted in a form field against the session. A valid token
/// is rotated so it cannot be replayed.
pub async fn validate_csrf_form_field(session: &Session, form_token: &str) -> Result<(), CsrfError> {
    let stored_token: Option<CsrfToken> = session.get(CSRF_TOKEN_KEY).await.map_err(|e| {
        warn!("Failed to get CSRF token from session: {}", e);
        CsrfError::Session
    })?;

    let stored_token = match stored_token {
        Some(token) if token.is_expired() => {
            warn!("CSRF token expired during form validation");
            return Err(CsrfError::Expired);
        }
        Some(token) => token,
        None => {
            warn!("No CSRF token in session for form validation");
            return Err(CsrfError::Missing);
        }
    };

    if form_token != stored_token.value {
        warn!(
            "CSRF form token mismatch: expected {}, got {}",
            token_prefix(&stored_token.value),
            token_prefix(form_token)
        );
        return Err(CsrfError::Mismatch);
    }

    debug!("CSRF form token validated, regenerating for replay protection");
    let _ = generate_csrf_token(session).await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_csrf_token_generation() {
        let session = session();

        let token1 = generate_csrf_token(&session).await.unwrap();
        let token2 = generate_csrf_token(&session).await.unwrap();

        assert!(!token1.is_empty());
        assert_ne!(token1, token2, "Tokens should be unique");
    }

    #[test]
    fn test_csrf_token_expiry() {
        let token = CsrfToken {
            value: "test".to_string(),
            created_at: chrono::Utc::now().timestamp() - 100000,
        };
        assert!(token.is_expired());
        assert!(!CsrfToken::new().is_expired());
    }

    #[tokio::test]
    async fn test_get_or_create_reuses_live_token() {
        let session = session();

        let token1 = get_or_create_csrf_token(&session).await.unwrap();
        let token2 = get_or_create_csrf_token(&session).await.unwrap();
        assert_eq!(token1, token2);
    }

    #[tokio::test]
    async fn test_valid_token_is_rotated() {
        let session = session();
        let token = get_or_create_csrf_token(&session).await.unwrap();

        assert_eq!(validate_csrf_form_field(&session, &token).await, Ok(()));

        // Replaying the same token fails.
        assert_eq!(
            validate_csrf_form_field(&session, &token).await,
            Err(CsrfError::Mismatch)
        );
    }

    #[tokio::test]
    async fn test_short_or_missing_tokens_are_rejected() {
        let session = session();
        assert_eq!(
            validate_csrf_form_field(&session, "abc").await,
            Err(CsrfError::Missing)
        );

        get_or_create_csrf_token(&session).await.unwrap();
        assert_eq!(
            validate_csrf_form_field(&session, "").await,
            Err(CsrfError::Mismatch)
        );
    }
}
