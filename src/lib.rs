pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use repositories::{SqliteAppointmentRepository, SqliteUserRepository};
use services::{AppointmentService, AuthService, UserService};
use std::sync::Arc;

/// Store handles shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub auth_service: Arc<AuthService>,
    pub appointment_service: Arc<AppointmentService>,
}

impl AppState {
    /// Wires the SQLite repositories and services over one pool.
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let appointment_repository = Arc::new(SqliteAppointmentRepository::new(pool));

        Self {
            user_service: Arc::new(UserService::new(user_repository.clone())),
            auth_service: Arc::new(AuthService::new(user_repository)),
            appointment_service: Arc::new(AppointmentService::new(appointment_repository)),
        }
    }
}
