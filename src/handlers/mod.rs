pub mod appointment_handlers;
pub mod home_handlers;
pub mod page;

pub use appointment_handlers::{
    create_appointment_handler, list_appointments_handler, new_appointment_page,
};
pub use home_handlers::index_handler;
