pub mod appointment;
pub mod user;

pub use appointment::{
    Appointment, AppointmentForm, AppointmentRow, NewAppointment, Service, UnknownService,
};
pub use user::User;
