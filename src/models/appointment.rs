use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Services offered by the salon. The stored value is also the label shown
/// to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Service {
    Manicure,
    Pedicure,
    #[serde(rename = "Nail Extensions")]
    NailExtensions,
}

impl Service {
    pub const ALL: [Service; 3] = [Service::Manicure, Service::Pedicure, Service::NailExtensions];

    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Manicure => "Manicure",
            Service::Pedicure => "Pedicure",
            Service::NailExtensions => "Nail Extensions",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown service: {0}")]
pub struct UnknownService(pub String);

impl FromStr for Service {
    type Err = UnknownService;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Service::ALL
            .into_iter()
            .find(|service| service.as_str() == s)
            .ok_or_else(|| UnknownService(s.to_string()))
    }
}

/// Raw row as stored in the `appointments` table.
#[derive(Debug, Clone, FromRow)]
pub struct AppointmentRow {
    pub id: i64,
    pub client_name: String,
    pub service: String,
    pub appointment_date: String,
    pub appointment_time: String,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub client_name: String,
    pub service: Service,
    /// `YYYY-MM-DD`
    pub appointment_date: String,
    /// `HH:MM`
    pub appointment_time: String,
    pub created_at: Option<String>,
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = UnknownService;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: row.id,
            client_name: row.client_name,
            service: row.service.parse()?,
            appointment_date: row.appointment_date,
            appointment_time: row.appointment_time,
            created_at: row.created_at,
        })
    }
}

/// A booking that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub client_name: String,
    pub service: Service,
    pub appointment_date: String,
    pub appointment_time: String,
}

/// Booking form as posted by the browser. Every field defaults to empty so a
/// missing input surfaces as a field error rather than a rejected request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentForm {
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub appointment_date: String,
    #[serde(default)]
    pub appointment_time: String,
    #[serde(default)]
    pub csrf_token: String,
}
