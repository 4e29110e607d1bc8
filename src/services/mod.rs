pub mod appointment_service;
pub mod auth_service;
pub mod user_service;

pub use appointment_service::{
    AppointmentService, AppointmentServiceError, BookingField, FieldError,
};
pub use auth_service::{AuthService, AuthServiceError, LoginRequest};
pub use user_service::{BootstrapOutcome, UserService, UserServiceError};
