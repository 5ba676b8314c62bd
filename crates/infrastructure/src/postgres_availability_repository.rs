//! PostgreSQL-backed availability repository.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::PgPool;

use servir_application::AvailabilityRepository;
use servir_core::{AppError, AppResult, ChurchId};
use servir_domain::{AvailabilityEntry, AvailabilityStatus, ProfileId};

/// PostgreSQL implementation of the availability repository port.
#[derive(Clone)]
pub struct PostgresAvailabilityRepository {
    pool: PgPool,
}

impl PostgresAvailabilityRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AvailabilityRow {
    profile_id: uuid::Uuid,
    date: chrono::NaiveDate,
    status: String,
}

impl TryFrom<AvailabilityRow> for AvailabilityEntry {
    type Error = AppError;

    fn try_from(row: AvailabilityRow) -> Result<Self, Self::Error> {
        let status = AvailabilityStatus::from_str(&row.status).map_err(|_| {
            AppError::Storage(format!(
                "unknown availability status '{}' in storage",
                row.status
            ))
        })?;

        Ok(Self {
            profile_id: ProfileId::from_uuid(row.profile_id),
            date: row.date,
            status,
        })
    }
}

#[async_trait]
impl AvailabilityRepository for PostgresAvailabilityRepository {
    async fn find_for_date(
        &self,
        date: chrono::NaiveDate,
        profile_ids: &[ProfileId],
    ) -> AppResult<Vec<AvailabilityEntry>> {
        let ids: Vec<uuid::Uuid> = profile_ids.iter().map(|id| id.as_uuid()).collect();

        let rows = sqlx::query_as::<_, AvailabilityRow>(
            r"
            SELECT profile_id, date, status
            FROM availability
            WHERE date = $1 AND profile_id = ANY($2)
            ",
        )
        .bind(date)
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Storage(format!("failed to read availability: {error}")))?;

        rows.into_iter().map(AvailabilityEntry::try_from).collect()
    }

    async fn upsert(&self, church_id: ChurchId, entry: AvailabilityEntry) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO availability (church_id, profile_id, date, status)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (profile_id, date)
            DO UPDATE SET status = EXCLUDED.status, updated_at = NOW()
            ",
        )
        .bind(church_id.as_uuid())
        .bind(entry.profile_id.as_uuid())
        .bind(entry.date)
        .bind(entry.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Storage(format!("failed to record availability: {error}")))?;

        Ok(())
    }

    async fn list_for_profile(&self, profile_id: ProfileId) -> AppResult<Vec<AvailabilityEntry>> {
        let rows = sqlx::query_as::<_, AvailabilityRow>(
            r"
            SELECT profile_id, date, status
            FROM availability
            WHERE profile_id = $1
            ORDER BY date
            ",
        )
        .bind(profile_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Storage(format!("failed to list availability: {error}")))?;

        rows.into_iter().map(AvailabilityEntry::try_from).collect()
    }
}
