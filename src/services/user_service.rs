use crate::models::user::User;
use crate::repositories::user_repository::{RepositoryError, UserRepository};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use std::sync::Arc;
use tracing::info;

pub const MAX_USERNAME_LEN: usize = 150;
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("Invalid username (1 to 150 characters, no surrounding whitespace)")]
    InvalidUsername,
    #[error("Password too weak (minimum 8 characters)")]
    WeakPassword,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("User not found")]
    UserNotFound,
    #[error("Username already taken")]
    UsernameTaken,
    #[error("Password hashing failed: {0}")]
    HashingError(String),
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub password_confirm: Option<String>,
}

pub struct UpdatePasswordRequest {
    pub user_id: i64,
    pub new_password: String,
    pub new_password_confirm: Option<String>,
}

/// Result of the startup bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Created,
    AlreadyInitialized,
}

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, UserServiceError> {
        self.validate_username(&request.username)?;

        if let Some(ref confirm) = request.password_confirm {
            if request.password != *confirm {
                return Err(UserServiceError::PasswordMismatch);
            }
        }

        self.validate_password(&request.password)?;

        let password_hash = hash_password(&request.password)?;

        match self
            .repository
            .create_user(&request.username, &password_hash)
            .await
        {
            Ok(user) => Ok(user),
            Err(RepositoryError::AlreadyExists) => Err(UserServiceError::UsernameTaken),
            Err(e) => Err(UserServiceError::RepositoryError(e)),
        }
    }

    /// Creates the seed administrator when no user exists yet. Running it
    /// again against an initialized store changes nothing.
    pub async fn ensure_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<BootstrapOutcome, UserServiceError> {
        if self.repository.count_users().await? > 0 {
            return Ok(BootstrapOutcome::AlreadyInitialized);
        }

        let request = CreateUserRequest {
            username: username.to_string(),
            password: password.to_string(),
            password_confirm: None,
        };

        match self.create_user(request).await {
            Ok(user) => {
                info!("Seeded administrator '{}' (id {})", user.username, user.id);
                Ok(BootstrapOutcome::Created)
            }
            // Another process seeded first.
            Err(UserServiceError::UsernameTaken) => Ok(BootstrapOutcome::AlreadyInitialized),
            Err(e) => Err(e),
        }
    }

    pub async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserServiceError> {
        Ok(self.repository.find_by_username(username).await?)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, UserServiceError> {
        Ok(self.repository.list_users().await?)
    }

    pub async fn update_password(
        &self,
        request: UpdatePasswordRequest,
    ) -> Result<(), UserServiceError> {
        if let Some(ref confirm) = request.new_password_confirm {
            if request.new_password != *confirm {
                return Err(UserServiceError::PasswordMismatch);
            }
        }

        self.validate_password(&request.new_password)?;

        let password_hash = hash_password(&request.new_password)?;

        match self
            .repository
            .update_password(request.user_id, &password_hash)
            .await
        {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => Err(UserServiceError::UserNotFound),
            Err(e) => Err(UserServiceError::RepositoryError(e)),
        }
    }

    fn validate_username(&self, username: &str) -> Result<(), UserServiceError> {
        let len = username.chars().count();
        if len == 0 || len > MAX_USERNAME_LEN || username.trim() != username {
            return Err(UserServiceError::InvalidUsername);
        }
        Ok(())
    }

    fn validate_password(&self, password: &str) -> Result<(), UserServiceError> {
        if password.len() < MIN_PASSWORD_LEN {
            return Err(UserServiceError::WeakPassword);
        }
        Ok(())
    }
}

/// Hashes a password into an argon2id PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, UserServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserServiceError::HashingError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;

    fn user(id: i64, username: &str) -> User {
        User {
            id,
            username: username.to_string(),
            password_hash: "hash".to_string(),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_ensure_admin_skips_when_users_exist() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_count_users()
            .times(1)
            .returning(|| Box::pin(async move { Ok(1) }));
        mock_repo.expect_create_user().never();

        let service = UserService::new(Arc::new(mock_repo));
        let outcome = service.ensure_admin("admin", "password").await.unwrap();

        assert_eq!(outcome, BootstrapOutcome::AlreadyInitialized);
    }

    #[tokio::test]
    async fn test_ensure_admin_stores_hash_not_password() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_count_users()
            .times(1)
            .returning(|| Box::pin(async move { Ok(0) }));
        mock_repo
            .expect_create_user()
            .withf(|username, hash| {
                username == "admin" && hash != "password" && hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|username, _| {
                let created = user(1, username);
                Box::pin(async move { Ok(created) })
            });

        let service = UserService::new(Arc::new(mock_repo));
        let outcome = service.ensure_admin("admin", "password").await.unwrap();

        assert_eq!(outcome, BootstrapOutcome::Created);
    }

    #[tokio::test]
    async fn test_create_user_rejects_short_password() {
        let mock_repo = MockUserRepository::new();
        let service = UserService::new(Arc::new(mock_repo));

        let result = service
            .create_user(CreateUserRequest {
                username: "admin".to_string(),
                password: "short".to_string(),
                password_confirm: None,
            })
            .await;

        assert!(matches!(result, Err(UserServiceError::WeakPassword)));
    }

    #[tokio::test]
    async fn test_create_user_rejects_blank_username() {
        let mock_repo = MockUserRepository::new();
        let service = UserService::new(Arc::new(mock_repo));

        let too_long = "a".repeat(MAX_USERNAME_LEN + 1);
        for username in ["", " admin", too_long.as_str()] {
            let result = service
                .create_user(CreateUserRequest {
                    username: username.to_string(),
                    password: "password123".to_string(),
                    password_confirm: None,
                })
                .await;
            assert!(matches!(result, Err(UserServiceError::InvalidUsername)));
        }
    }

    #[tokio::test]
    async fn test_create_user_password_mismatch() {
        let mock_repo = MockUserRepository::new();
        let service = UserService::new(Arc::new(mock_repo));

        let result = service
            .create_user(CreateUserRequest {
                username: "admin".to_string(),
                password: "password123".to_string(),
                password_confirm: Some("password124".to_string()),
            })
            .await;

        assert!(matches!(result, Err(UserServiceError::PasswordMismatch)));
    }

    #[test]
    fn test_hash_password_is_salted() {
        let first = hash_password("password").unwrap();
        let second = hash_password("password").unwrap();
        assert_ne!(first, second);
    }
}
