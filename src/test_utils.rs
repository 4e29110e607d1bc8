pub mod test_helpers {
    use crate::config::session::{SessionConfig, SessionLayer};
    use crate::models::{Appointment, NewAppointment, Service};
    use crate::repositories::{AppointmentRepository, SqliteAppointmentRepository};
    use crate::services::user_service::hash_password;
    use crate::{routes, AppState};
    use axum::Router;
    use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
    use tower_sessions::cookie::Key;
    use tower_sessions_sqlx_store::SqliteStore;

    /// Create a new in-memory SQLite database for testing
    pub async fn create_test_db() -> Result<SqlitePool, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(pool)
    }

    /// Insert a test user with hashed password
    pub async fn insert_test_user(
        pool: &SqlitePool,
        username: &str,
        password: &str,
    ) -> Result<i64, sqlx::Error> {
        let password_hash = hash_password(password).map_err(|e| {
            sqlx::Error::Configuration(format!("Password hashing failed: {}", e).into())
        })?;

        let result = sqlx::query("INSERT INTO users (username, password_hash) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Store an appointment directly, bypassing validation
    pub async fn insert_test_appointment(
        pool: &SqlitePool,
        client_name: &str,
        service: Service,
        date: &str,
        time: &str,
    ) -> Result<Appointment, sqlx::Error> {
        let repository = SqliteAppointmentRepository::new(pool.clone());
        let new_appointment = NewAppointment {
            client_name: client_name.to_string(),
            service,
            appointment_date: date.to_string(),
            appointment_time: time.to_string(),
        };

        repository
            .create(&new_appointment)
            .await
            .map_err(|e| sqlx::Error::Protocol(e.to_string()))
    }

    /// Session layer backed by the test database with a throwaway signing key
    pub async fn create_test_session_layer(pool: &SqlitePool) -> Result<SessionLayer, sqlx::Error> {
        let store = SqliteStore::new(pool.clone());
        store.migrate().await?;

        Ok(SessionConfig::development().create_layer_with_key(store, Key::generate()))
    }

    /// Full application router over the given database
    pub async fn create_test_app(pool: &SqlitePool) -> Result<Router, sqlx::Error> {
        let session_layer = create_test_session_layer(pool).await?;
        Ok(routes::build_router(AppState::new(pool.clone()), session_layer))
    }
}

// Re-export commonly used test functions at module level for convenience
// Note: This is test-only code. Panic on error is acceptable in tests.
#[cfg(test)]
pub async fn create_test_pool() -> sqlx::SqlitePool {
    match test_helpers::create_test_db().await {
        Ok(pool) => pool,
        Err(e) => panic!("Failed to create test pool: {}", e),
    }
}
