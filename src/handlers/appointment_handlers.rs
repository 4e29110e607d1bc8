use crate::auth::CurrentUser;
use crate::auth::handlers::INVALID_CSRF_MESSAGE;
use crate::error::{AppError, Result};
use crate::flash::{push_flash, FlashLevel};
use crate::handlers::page::PageContext;
use crate::middleware::csrf::{get_or_create_csrf_token, validate_csrf_form_field};
use crate::models::{Appointment, AppointmentForm, Service};
use crate::services::{AppointmentServiceError, BookingField, FieldError};
use crate::AppState;
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::debug;

pub const BOOKING_SUCCESS_MESSAGE: &str = "Your appointment has been booked!";

pub struct ServiceOption {
    pub value: &'static str,
    pub selected: bool,
}

/// Per-field messages shown next to the inputs.
#[derive(Default)]
pub struct FieldErrors {
    pub client_name: Option<String>,
    pub service: Option<String>,
    pub appointment_date: Option<String>,
    pub appointment_time: Option<String>,
}

impl From<&FieldError> for FieldErrors {
    fn from(error: &FieldError) -> Self {
        let message = Some(error.message.to_string());
        let mut errors = FieldErrors::default();
        match error.field {
            BookingField::ClientName => errors.client_name = message,
            BookingField::Service => errors.service = message,
            BookingField::AppointmentDate => errors.appointment_date = message,
            BookingField::AppointmentTime => errors.appointment_time = message,
        }
        errors
    }
}

#[derive(Template)]
#[template(path = "appointments/new.html")]
struct NewAppointmentTemplate {
    page: PageContext,
    form: AppointmentForm,
    services: Vec<ServiceOption>,
    errors: FieldErrors,
    form_error: Option<String>,
    csrf_token: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "appointments/list.html")]
struct AppointmentsTemplate {
    page: PageContext,
    appointments: Vec<Appointment>,
}

fn service_options(selected: &str) -> Vec<ServiceOption> {
    Service::ALL
        .iter()
        .map(|service| ServiceOption {
            value: service.as_str(),
            selected: service.as_str() == selected,
        })
        .collect()
}

async fn render_form(
    session: &Session,
    form: AppointmentForm,
    errors: FieldErrors,
    form_error: Option<&str>,
) -> Result<Response> {
    let csrf_token = get_or_create_csrf_token(session).await?;

    let template = NewAppointmentTemplate {
        page: PageContext::load(session).await?,
        services: service_options(&form.service),
        form,
        errors,
        form_error: form_error.map(str::to_string),
        csrf_token,
    };
    Ok(Html(template.render()?).into_response())
}

/// GET /add_appointment - booking form
pub async fn new_appointment_page(session: Session) -> Result<Response> {
    render_form(
        &session,
        AppointmentForm::default(),
        FieldErrors::default(),
        None,
    )
    .await
}

/// POST /add_appointment - validate and store a booking
pub async fn create_appointment_handler(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AppointmentForm>,
) -> Result<Response> {
    if validate_csrf_form_field(&session, &form.csrf_token)
        .await
        .is_err()
    {
        return render_form(&session, form, FieldErrors::default(), Some(INVALID_CSRF_MESSAGE))
            .await;
    }

    match state.appointment_service.book(&form).await {
        Ok(_) => {
            push_flash(&session, FlashLevel::Success, BOOKING_SUCCESS_MESSAGE).await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(AppointmentServiceError::Validation(error)) => {
            debug!("Rejected booking: {}", error);
            render_form(&session, form, FieldErrors::from(&error), None).await
        }
        Err(err) => Err(AppError::from(err)),
    }
}

/// GET /appointments - every booking, administrators only
pub async fn list_appointments_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    session: Session,
) -> Result<Response> {
    let appointments = state.appointment_service.list_all().await?;
    debug!(
        "Listing {} appointments for '{}'",
        appointments.len(),
        user.username
    );

    Ok(AppointmentsTemplate {
        page: PageContext::load(&session).await?,
        appointments,
    }
    .into_response())
}
