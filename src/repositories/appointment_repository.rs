use crate::models::appointment::{Appointment, AppointmentRow, NewAppointment};
use async_trait::async_trait;
use sqlx::SqlitePool;

#[derive(Debug, thiserror::Error)]
pub enum AppointmentRepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Appointment not found")]
    NotFound,
    #[error("Corrupt appointment row {id}: {reason}")]
    CorruptRow { id: i64, reason: String },
}

pub type AppointmentRepositoryResult<T> = Result<T, AppointmentRepositoryError>;

/// Append-only store for booking requests.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait AppointmentRepository: Send + Sync {
    async fn create(&self, appointment: &NewAppointment)
        -> AppointmentRepositoryResult<Appointment>;
    async fn find_by_id(&self, id: i64) -> AppointmentRepositoryResult<Option<Appointment>>;
    async fn list_all(&self) -> AppointmentRepositoryResult<Vec<Appointment>>;
}

pub struct SqliteAppointmentRepository {
    pool: SqlitePool,
}

impl SqliteAppointmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn from_row(row: AppointmentRow) -> AppointmentRepositoryResult<Appointment> {
    let id = row.id;
    Appointment::try_from(row).map_err(|e| AppointmentRepositoryError::CorruptRow {
        id,
        reason: e.to_string(),
    })
}

#[async_trait]
impl AppointmentRepository for SqliteAppointmentRepository {
    async fn create(
        &self,
        appointment: &NewAppointment,
    ) -> AppointmentRepositoryResult<Appointment> {
        let result = sqlx::query(
            r#"
            INSERT INTO appointments (client_name, service, appointment_date, appointment_time)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&appointment.client_name)
        .bind(appointment.service.as_str())
        .bind(&appointment.appointment_date)
        .bind(&appointment.appointment_time)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or(AppointmentRepositoryError::NotFound)
    }

    async fn find_by_id(&self, id: i64) -> AppointmentRepositoryResult<Option<Appointment>> {
        let row = sqlx::query_as::<_, AppointmentRow>(
            r#"
            SELECT id, client_name, service, appointment_date, appointment_time, created_at
            FROM appointments
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(from_row).transpose()
    }

    async fn list_all(&self) -> AppointmentRepositoryResult<Vec<Appointment>> {
        let rows = sqlx::query_as::<_, AppointmentRow>(
            r#"
            SELECT id, client_name, service, appointment_date, appointment_time, created_at
            FROM appointments
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Service;
    use crate::test_utils::create_test_pool;

    fn booking(name: &str, service: Service) -> NewAppointment {
        NewAppointment {
            client_name: name.to_string(),
            service,
            appointment_date: "2099-01-01".to_string(),
            appointment_time: "10:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_returns_stored_record() {
        let repo = SqliteAppointmentRepository::new(create_test_pool().await);

        let stored = repo
            .create(&booking("Anna", Service::NailExtensions))
            .await
            .unwrap();

        assert!(stored.id > 0);
        assert_eq!(stored.client_name, "Anna");
        assert_eq!(stored.service, Service::NailExtensions);
        assert_eq!(stored.appointment_date, "2099-01-01");
        assert_eq!(stored.appointment_time, "10:00");
    }

    #[tokio::test]
    async fn test_list_all_keeps_insertion_order() {
        let repo = SqliteAppointmentRepository::new(create_test_pool().await);

        repo.create(&booking("Anna", Service::Manicure)).await.unwrap();
        repo.create(&booking("Boris", Service::Pedicure)).await.unwrap();
        repo.create(&booking("Clara", Service::Manicure)).await.unwrap();

        let names: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.client_name)
            .collect();
        assert_eq!(names, vec!["Anna", "Boris", "Clara"]);
    }

    #[tokio::test]
    async fn test_identical_slots_are_both_stored() {
        let repo = SqliteAppointmentRepository::new(create_test_pool().await);

        let first = repo.create(&booking("Anna", Service::Manicure)).await.unwrap();
        let second = repo.create(&booking("Anna", Service::Manicure)).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(repo.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let repo = SqliteAppointmentRepository::new(create_test_pool().await);
        assert!(repo.find_by_id(7).await.unwrap().is_none());
    }
}
