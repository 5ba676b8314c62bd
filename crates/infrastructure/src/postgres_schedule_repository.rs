//! PostgreSQL-backed schedule repository.

use async_trait::async_trait;
use sqlx::PgPool;

use servir_application::ScheduleRepository;
use servir_core::{AppError, AppResult, ChurchId};
use servir_domain::{MinistryId, ProfileId, Schedule, ScheduleId, ServiceTimeId};

/// PostgreSQL implementation of the schedule repository port.
#[derive(Clone)]
pub struct PostgresScheduleRepository {
    pool: PgPool,
}

impl PostgresScheduleRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ScheduleRow {
    id: uuid::Uuid,
    church_id: uuid::Uuid,
    ministry_id: uuid::Uuid,
    date: chrono::NaiveDate,
    service_time_id: uuid::Uuid,
    created_by_profile_id: Option<uuid::Uuid>,
}

impl From<ScheduleRow> for Schedule {
    fn from(row: ScheduleRow) -> Self {
        Self {
            id: ScheduleId::from_uuid(row.id),
            church_id: ChurchId::from_uuid(row.church_id),
            ministry_id: MinistryId::from_uuid(row.ministry_id),
            date: row.date,
            service_time_id: ServiceTimeId::from_uuid(row.service_time_id),
            created_by_profile_id: row.created_by_profile_id.map(ProfileId::from_uuid),
        }
    }
}

#[async_trait]
impl ScheduleRepository for PostgresScheduleRepository {
    async fn find_by_id(&self, schedule_id: ScheduleId) -> AppResult<Option<Schedule>> {
        let row = sqlx::query_as::<_, ScheduleRow>(
            r"
            SELECT id, church_id, ministry_id, date, service_time_id, created_by_profile_id
            FROM schedules
            WHERE id = $1
            ",
        )
        .bind(schedule_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Storage(format!("failed to find schedule: {error}")))?;

        Ok(row.map(Schedule::from))
    }

    async fn create(&self, schedule: Schedule) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO schedules (id, church_id, ministry_id, date, service_time_id, created_by_profile_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(schedule.id.as_uuid())
        .bind(schedule.church_id.as_uuid())
        .bind(schedule.ministry_id.as_uuid())
        .bind(schedule.date)
        .bind(schedule.service_time_id.as_uuid())
        .bind(schedule.created_by_profile_id.map(|id| id.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Storage(format!("failed to create schedule: {error}")))?;

        Ok(())
    }

    async fn list_by_church(&self, church_id: ChurchId) -> AppResult<Vec<Schedule>> {
        let rows = sqlx::query_as::<_, ScheduleRow>(
            r"
            SELECT id, church_id, ministry_id, date, service_time_id, created_by_profile_id
            FROM schedules
            WHERE church_id = $1
            ORDER BY date, id
            ",
        )
        .bind(church_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Storage(format!("failed to list schedules: {error}")))?;

        Ok(rows.into_iter().map(Schedule::from).collect())
    }
}
