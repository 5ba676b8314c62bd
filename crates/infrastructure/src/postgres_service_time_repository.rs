//! PostgreSQL-backed service time repository.

use async_trait::async_trait;
use sqlx::PgPool;

use servir_application::ServiceTimeRepository;
use servir_core::{AppError, AppResult, ChurchId};
use servir_domain::{ServiceTime, ServiceTimeId};

/// PostgreSQL implementation of the service time repository port.
#[derive(Clone)]
pub struct PostgresServiceTimeRepository {
    pool: PgPool,
}

impl PostgresServiceTimeRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ServiceTimeRow {
    id: uuid::Uuid,
    church_id: uuid::Uuid,
    day_of_week: String,
    time: String,
    name: Option<String>,
}

impl From<ServiceTimeRow> for ServiceTime {
    fn from(row: ServiceTimeRow) -> Self {
        Self {
            id: ServiceTimeId::from_uuid(row.id),
            church_id: ChurchId::from_uuid(row.church_id),
            day_of_week: row.day_of_week,
            time: row.time,
            name: row.name,
        }
    }
}

#[async_trait]
impl ServiceTimeRepository for PostgresServiceTimeRepository {
    async fn create(&self, service_time: ServiceTime) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO service_times (id, church_id, day_of_week, time, name)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(service_time.id.as_uuid())
        .bind(service_time.church_id.as_uuid())
        .bind(&service_time.day_of_week)
        .bind(&service_time.time)
        .bind(&service_time.name)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Storage(format!("failed to create service time: {error}")))?;

        Ok(())
    }

    async fn list_by_church(&self, church_id: ChurchId) -> AppResult<Vec<ServiceTime>> {
        let rows = sqlx::query_as::<_, ServiceTimeRow>(
            r"
            SELECT id, church_id, day_of_week, time, name
            FROM service_times
            WHERE church_id = $1
            ORDER BY day_of_week, time, id
            ",
        )
        .bind(church_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Storage(format!("failed to list service times: {error}")))?;

        Ok(rows.into_iter().map(ServiceTime::from).collect())
    }

    async fn find_by_id(&self, service_time_id: ServiceTimeId) -> AppResult<Option<ServiceTime>> {
        let row = sqlx::query_as::<_, ServiceTimeRow>(
            r"
            SELECT id, church_id, day_of_week, time, name
            FROM service_times
            WHERE id = $1
            ",
        )
        .bind(service_time_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Storage(format!("failed to find service time: {error}")))?;

        Ok(row.map(ServiceTime::from))
    }
}
