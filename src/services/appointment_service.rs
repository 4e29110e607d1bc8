use crate::models::appointment::{Appointment, AppointmentForm, NewAppointment, Service};
use crate::repositories::appointment_repository::{
    AppointmentRepository, AppointmentRepositoryError,
};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;
use std::sync::Arc;
use tracing::info;

pub const MAX_CLIENT_NAME_LEN: usize = 255;
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Booking form field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingField {
    ClientName,
    Service,
    AppointmentDate,
    AppointmentTime,
}

impl BookingField {
    pub fn name(&self) -> &'static str {
        match self {
            BookingField::ClientName => "client_name",
            BookingField::Service => "service",
            BookingField::AppointmentDate => "appointment_date",
            BookingField::AppointmentTime => "appointment_time",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: BookingField,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: BookingField, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.name(), self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppointmentServiceError {
    #[error("Validation failed: {0}")]
    Validation(FieldError),
    #[error("Repository error: {0}")]
    RepositoryError(#[from] AppointmentRepositoryError),
}

pub struct AppointmentService {
    repository: Arc<dyn AppointmentRepository>,
}

impl AppointmentService {
    pub fn new(repository: Arc<dyn AppointmentRepository>) -> Self {
        Self { repository }
    }

    /// Validates and stores a booking against the local clock.
    pub async fn book(&self, form: &AppointmentForm) -> Result<Appointment, AppointmentServiceError> {
        self.book_at(form, Local::now().naive_local()).await
    }

    /// Validates and stores a booking as if it was submitted at `now`.
    pub async fn book_at(
        &self,
        form: &AppointmentForm,
        now: NaiveDateTime,
    ) -> Result<Appointment, AppointmentServiceError> {
        let new_appointment =
            validate_booking(form, now).map_err(AppointmentServiceError::Validation)?;

        let appointment = self.repository.create(&new_appointment).await?;

        info!(
            "Booked appointment {} ({} on {} at {})",
            appointment.id,
            appointment.service,
            appointment.appointment_date,
            appointment.appointment_time
        );

        Ok(appointment)
    }

    pub async fn list_all(&self) -> Result<Vec<Appointment>, AppointmentServiceError> {
        Ok(self.repository.list_all().await?)
    }
}

/// Checks the booking rules in form order and returns the first violation.
pub fn validate_booking(
    form: &AppointmentForm,
    now: NaiveDateTime,
) -> Result<NewAppointment, FieldError> {
    if form.client_name.trim().is_empty() {
        return Err(FieldError::new(
            BookingField::ClientName,
            "Client name is required.",
        ));
    }
    if form.client_name.chars().count() > MAX_CLIENT_NAME_LEN {
        return Err(FieldError::new(
            BookingField::ClientName,
            "Client name must be at most 255 characters.",
        ));
    }

    let service: Service = form.service.parse().map_err(|_| {
        FieldError::new(BookingField::Service, "Please choose a valid service.")
    })?;

    let date = NaiveDate::parse_from_str(form.appointment_date.trim(), DATE_FORMAT).map_err(
        |_| FieldError::new(BookingField::AppointmentDate, "Please enter a valid date."),
    )?;
    if date < now.date() {
        return Err(FieldError::new(
            BookingField::AppointmentDate,
            "Appointment date cannot be in the past.",
        ));
    }

    let time = parse_time(form.appointment_time.trim()).ok_or_else(|| {
        FieldError::new(BookingField::AppointmentTime, "Please enter a valid time.")
    })?;
    if date == now.date() && time < now.time() {
        return Err(FieldError::new(
            BookingField::AppointmentTime,
            "Appointment time cannot be in the past.",
        ));
    }

    Ok(NewAppointment {
        client_name: form.client_name.clone(),
        service,
        appointment_date: date.format(DATE_FORMAT).to_string(),
        appointment_time: time.format(TIME_FORMAT).to_string(),
    })
}

// Some browsers post seconds for <input type="time">; they are dropped.
fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
        .and_then(|t| NaiveTime::from_hms_opt(t.hour(), t.minute(), 0))
}
