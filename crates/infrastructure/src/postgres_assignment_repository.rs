//! PostgreSQL-backed assignment repository.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::PgPool;

use servir_application::{AssignmentRepository, AssignmentStatusCounts, AssignmentTimestamps};
use servir_core::{AppError, AppResult, ChurchId};
use servir_domain::{Assignment, AssignmentId, AssignmentStatus, ProfileId, ScheduleId};

/// PostgreSQL implementation of the assignment repository port.
#[derive(Clone)]
pub struct PostgresAssignmentRepository {
    pool: PgPool,
}

impl PostgresAssignmentRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AssignmentRow {
    id: uuid::Uuid,
    schedule_id: uuid::Uuid,
    profile_id: uuid::Uuid,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
    confirmed_at: Option<chrono::DateTime<chrono::Utc>>,
    declined_at: Option<chrono::DateTime<chrono::Utc>>,
    cancelled_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl TryFrom<AssignmentRow> for Assignment {
    type Error = AppError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        let status = AssignmentStatus::from_str(&row.status).map_err(|_| {
            AppError::Storage(format!("unknown assignment status '{}' in storage", row.status))
        })?;

        Ok(Self {
            id: AssignmentId::from_uuid(row.id),
            schedule_id: ScheduleId::from_uuid(row.schedule_id),
            profile_id: ProfileId::from_uuid(row.profile_id),
            status,
            created_at: row.created_at,
            confirmed_at: row.confirmed_at,
            declined_at: row.declined_at,
            cancelled_at: row.cancelled_at,
        })
    }
}

const ASSIGNMENT_COLUMNS: &str =
    "id, schedule_id, profile_id, status, created_at, confirmed_at, declined_at, cancelled_at";

#[async_trait]
impl AssignmentRepository for PostgresAssignmentRepository {
    async fn find_by_id(&self, assignment_id: AssignmentId) -> AppResult<Option<Assignment>> {
        let query =
            format!("SELECT {ASSIGNMENT_COLUMNS} FROM assignments WHERE id = $1");

        let row = sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(assignment_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| AppError::Storage(format!("failed to find assignment: {error}")))?;

        row.map(Assignment::try_from).transpose()
    }

    async fn insert(
        &self,
        schedule_id: ScheduleId,
        profile_id: ProfileId,
        status: AssignmentStatus,
    ) -> AppResult<Assignment> {
        let query = format!(
            r"
            INSERT INTO assignments (id, schedule_id, profile_id, status)
            VALUES ($1, $2, $3, $4)
            RETURNING {ASSIGNMENT_COLUMNS}
            "
        );

        let row = sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(AssignmentId::new().as_uuid())
            .bind(schedule_id.as_uuid())
            .bind(profile_id.as_uuid())
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(duplicate_or_storage)?;

        Assignment::try_from(row)
    }

    async fn find_active_by_schedule(&self, schedule_id: ScheduleId) -> AppResult<Vec<Assignment>> {
        let query = format!(
            r"
            SELECT {ASSIGNMENT_COLUMNS}
            FROM assignments
            WHERE schedule_id = $1 AND status IN ('pending', 'confirmed')
            "
        );

        let rows = sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(schedule_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Storage(format!("failed to find schedule assignments: {error}"))
            })?;

        rows_into_assignments(rows)
    }

    async fn find_active_by_date(&self, date: chrono::NaiveDate) -> AppResult<Vec<Assignment>> {
        let query = r"
            SELECT a.id, a.schedule_id, a.profile_id, a.status,
                   a.created_at, a.confirmed_at, a.declined_at, a.cancelled_at
            FROM assignments a
            JOIN schedules s ON s.id = a.schedule_id
            WHERE s.date = $1 AND a.status IN ('pending', 'confirmed')
            ";

        let rows = sqlx::query_as::<_, AssignmentRow>(query)
            .bind(date)
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Storage(format!("failed to find assignments by date: {error}"))
            })?;

        rows_into_assignments(rows)
    }

    async fn find_by_schedule(&self, schedule_id: ScheduleId) -> AppResult<Vec<Assignment>> {
        let query = format!(
            r"
            SELECT {ASSIGNMENT_COLUMNS}
            FROM assignments
            WHERE schedule_id = $1
            ORDER BY created_at, id
            "
        );

        let rows = sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(schedule_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Storage(format!("failed to list schedule assignments: {error}"))
            })?;

        rows_into_assignments(rows)
    }

    async fn find_by_profile(&self, profile_id: ProfileId) -> AppResult<Vec<Assignment>> {
        let query = format!(
            r"
            SELECT {ASSIGNMENT_COLUMNS}
            FROM assignments
            WHERE profile_id = $1
            ORDER BY created_at, id
            "
        );

        let rows = sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(profile_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Storage(format!("failed to list profile assignments: {error}"))
            })?;

        rows_into_assignments(rows)
    }

    async fn update_status(
        &self,
        assignment_id: AssignmentId,
        status: AssignmentStatus,
        timestamps: AssignmentTimestamps,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r"
            UPDATE assignments
            SET status = $2, confirmed_at = $3, declined_at = $4, cancelled_at = $5
            WHERE id = $1
            ",
        )
        .bind(assignment_id.as_uuid())
        .bind(status.as_str())
        .bind(timestamps.confirmed_at)
        .bind(timestamps.declined_at)
        .bind(timestamps.cancelled_at)
        .execute(&self.pool)
        .await
        .map_err(duplicate_or_storage)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "assignment '{assignment_id}' does not exist"
            )));
        }

        Ok(())
    }

    async fn status_counts(&self, church_id: ChurchId) -> AppResult<AssignmentStatusCounts> {
        let row: (i64, i64, i64) = sqlx::query_as(
            r"
            SELECT COUNT(*) FILTER (WHERE a.status = 'confirmed'),
                   COUNT(*) FILTER (WHERE a.status = 'pending'),
                   COUNT(*) FILTER (WHERE a.status = 'declined')
            FROM assignments a
            JOIN schedules s ON s.id = a.schedule_id
            WHERE s.church_id = $1
            ",
        )
        .bind(church_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Storage(format!("failed to count assignments: {error}")))?;

        Ok(AssignmentStatusCounts {
            confirmed: u64::try_from(row.0).unwrap_or_default(),
            pending: u64::try_from(row.1).unwrap_or_default(),
            declined: u64::try_from(row.2).unwrap_or_default(),
        })
    }
}

fn rows_into_assignments(rows: Vec<AssignmentRow>) -> AppResult<Vec<Assignment>> {
    rows.into_iter().map(Assignment::try_from).collect()
}

fn duplicate_or_storage(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict(
            "this volunteer already holds an active assignment on the schedule".to_owned(),
        );
    }

    AppError::Storage(format!("failed to write assignment: {error}"))
}
