//! PostgreSQL-backed ministry repository.

use async_trait::async_trait;
use sqlx::PgPool;

use servir_application::MinistryRepository;
use servir_core::{AppError, AppResult, ChurchId};
use servir_domain::{Ministry, MinistryId, ProfileId};

/// PostgreSQL implementation of the ministry repository port.
#[derive(Clone)]
pub struct PostgresMinistryRepository {
    pool: PgPool,
}

impl PostgresMinistryRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MinistryRow {
    id: uuid::Uuid,
    church_id: uuid::Uuid,
    name: String,
    description: Option<String>,
    leader_profile_id: Option<uuid::Uuid>,
}

impl From<MinistryRow> for Ministry {
    fn from(row: MinistryRow) -> Self {
        Self {
            id: MinistryId::from_uuid(row.id),
            church_id: ChurchId::from_uuid(row.church_id),
            name: row.name,
            description: row.description,
            leader_profile_id: row.leader_profile_id.map(ProfileId::from_uuid),
        }
    }
}

#[async_trait]
impl MinistryRepository for PostgresMinistryRepository {
    async fn find_by_id(&self, ministry_id: MinistryId) -> AppResult<Option<Ministry>> {
        let row = sqlx::query_as::<_, MinistryRow>(
            r"
            SELECT id, church_id, name, description, leader_profile_id
            FROM ministries
            WHERE id = $1
            ",
        )
        .bind(ministry_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Storage(format!("failed to find ministry: {error}")))?;

        Ok(row.map(Ministry::from))
    }

    async fn create(&self, ministry: Ministry) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO ministries (id, church_id, name, description, leader_profile_id)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(ministry.id.as_uuid())
        .bind(ministry.church_id.as_uuid())
        .bind(&ministry.name)
        .bind(&ministry.description)
        .bind(ministry.leader_profile_id.map(|id| id.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Storage(format!("failed to create ministry: {error}")))?;

        Ok(())
    }

    async fn update(&self, ministry: Ministry) -> AppResult<()> {
        let result = sqlx::query(
            r"
            UPDATE ministries
            SET name = $2, description = $3, leader_profile_id = $4
            WHERE id = $1
            ",
        )
        .bind(ministry.id.as_uuid())
        .bind(&ministry.name)
        .bind(&ministry.description)
        .bind(ministry.leader_profile_id.map(|id| id.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Storage(format!("failed to update ministry: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "ministry '{}' does not exist",
                ministry.id
            )));
        }

        Ok(())
    }

    async fn delete(&self, ministry_id: MinistryId) -> AppResult<()> {
        sqlx::query("DELETE FROM ministries WHERE id = $1")
            .bind(ministry_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Storage(format!("failed to delete ministry: {error}")))?;

        Ok(())
    }

    async fn list_by_church(&self, church_id: ChurchId) -> AppResult<Vec<Ministry>> {
        let rows = sqlx::query_as::<_, MinistryRow>(
            r"
            SELECT id, church_id, name, description, leader_profile_id
            FROM ministries
            WHERE church_id = $1
            ORDER BY name, id
            ",
        )
        .bind(church_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Storage(format!("failed to list ministries: {error}")))?;

        Ok(rows.into_iter().map(Ministry::from).collect())
    }
}
