pub mod appointment_repository;
pub mod user_repository;

pub use appointment_repository::{AppointmentRepository, SqliteAppointmentRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};
