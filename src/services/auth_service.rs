use crate::models::user::User;
use crate::repositories::user_repository::UserRepository;
use crate::services::user_service::hash_password;
use argon2::{password_hash::PasswordHash, Argon2, PasswordVerifier};
use once_cell::sync::Lazy;
use std::sync::Arc;
use uuid::Uuid;

/// Verified when the username is unknown so both failure paths do the same work.
static DUMMY_PASSWORD_HASH: Lazy<String> =
    Lazy::new(|| hash_password(&Uuid::new_v4().to_string()).unwrap_or_default());

#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Repository error: {0}")]
    RepositoryError(#[from] crate::repositories::user_repository::RepositoryError),
}

pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    pub async fn authenticate(&self, request: LoginRequest) -> Result<User, AuthServiceError> {
        let user = self
            .user_repository
            .find_by_username(&request.username)
            .await?;

        match user {
            Some(user) if self.verify_password(&request.password, &user.password_hash) => {
                Ok(user)
            }
            Some(_) => Err(AuthServiceError::InvalidCredentials),
            None => {
                self.verify_password(&request.password, &DUMMY_PASSWORD_HASH);
                Err(AuthServiceError::InvalidCredentials)
            }
        }
    }

    fn verify_password(&self, password: &str, password_hash: &str) -> bool {
        if let Ok(parsed_hash) = PasswordHash::new(password_hash) {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok()
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;
    use mockall::predicate::*;

    #[tokio::test]
    async fn test_authenticate_unknown_username() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_username()
            .with(eq("ghost"))
            .times(1)
            .returning(|_| Box::pin(async move { Ok(None) }));

        let service = AuthService::new(Arc::new(mock_repo));

        let request = LoginRequest {
            username: "ghost".to_string(),
            password: "password123".to_string(),
        };

        let result = service.authenticate(request).await;
        assert!(matches!(result, Err(AuthServiceError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_is_case_sensitive_on_password() {
        let password_hash = hash_password("Password").unwrap();
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_username()
            .with(eq("admin"))
            .times(2)
            .returning(move |_| {
                let user = User {
                    id: 1,
                    username: "admin".to_string(),
                    password_hash: password_hash.clone(),
                    created_at: None,
                };
                Box::pin(async move { Ok(Some(user)) })
            });

        let service = AuthService::new(Arc::new(mock_repo));

        let wrong = service
            .authenticate(LoginRequest {
                username: "admin".to_string(),
                password: "password".to_string(),
            })
            .await;
        assert!(matches!(wrong, Err(AuthServiceError::InvalidCredentials)));

        let right = service
            .authenticate(LoginRequest {
                username: "admin".to_string(),
                password: "Password".to_string(),
            })
            .await;
        assert_eq!(right.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_corrupt_hash_never_verifies() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo.expect_find_by_username().returning(|_| {
            let user = User {
                id: 1,
                username: "admin".to_string(),
                password_hash: "password".to_string(),
                created_at: None,
            };
            Box::pin(async move { Ok(Some(user)) })
        });

        let service = AuthService::new(Arc::new(mock_repo));

        let result = service
            .authenticate(LoginRequest {
                username: "admin".to_string(),
                password: "password".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AuthServiceError::InvalidCredentials)));
    }
}
