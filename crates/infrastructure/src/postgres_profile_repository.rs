//! PostgreSQL-backed profile repository.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::PgPool;

use servir_application::{
    NewProfile, ProfileAccount, ProfileRepository, ProfileUpdate,
};
use servir_core::{AppError, AppResult, ChurchId};
use servir_domain::{MinistryId, Profile, ProfileId, Role};

/// PostgreSQL implementation of the profile repository port.
#[derive(Clone)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: uuid::Uuid,
    church_id: uuid::Uuid,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    avatar_url: Option<String>,
    role: String,
    ministry_ids: Vec<uuid::Uuid>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = AppError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let role = Role::from_str(&row.role)
            .map_err(|_| AppError::Storage(format!("unknown role '{}' in storage", row.role)))?;

        Ok(Self {
            id: ProfileId::from_uuid(row.id),
            church_id: ChurchId::from_uuid(row.church_id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            avatar_url: row.avatar_url,
            role,
            ministry_ids: row
                .ministry_ids
                .into_iter()
                .map(MinistryId::from_uuid)
                .collect(),
            created_at: row.created_at,
        })
    }
}

const PROFILE_COLUMNS: &str = r"
    p.id, p.church_id, p.name, p.email, p.phone, p.avatar_url, p.role, p.created_at,
    COALESCE(
        ARRAY_AGG(pm.ministry_id) FILTER (WHERE pm.ministry_id IS NOT NULL),
        '{}'
    ) AS ministry_ids
";

mod account;
mod lookup;

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find_by_id(&self, profile_id: ProfileId) -> AppResult<Option<Profile>> {
        self.find_by_id_impl(profile_id).await
    }

    async fn find_by_ministry_and_roles(
        &self,
        ministry_id: MinistryId,
        roles: &[Role],
    ) -> AppResult<Vec<Profile>> {
        self.find_by_ministry_and_roles_impl(ministry_id, roles)
            .await
    }

    async fn find_volunteer_by_pin_hash(&self, pin_hash: &str) -> AppResult<Option<Profile>> {
        self.find_volunteer_by_pin_hash_impl(pin_hash).await
    }

    async fn find_account_by_email(&self, email: &str) -> AppResult<Option<ProfileAccount>> {
        self.find_account_by_email_impl(email).await
    }

    async fn create(&self, input: NewProfile) -> AppResult<Profile> {
        self.create_impl(input).await
    }

    async fn update(&self, profile_id: ProfileId, changes: ProfileUpdate) -> AppResult<()> {
        self.update_impl(profile_id, changes).await
    }

    async fn update_pin_hash(&self, profile_id: ProfileId, pin_hash: &str) -> AppResult<()> {
        self.update_pin_hash_impl(profile_id, pin_hash).await
    }

    async fn list_by_church(&self, church_id: ChurchId) -> AppResult<Vec<Profile>> {
        self.list_by_church_impl(church_id).await
    }
}

fn rows_into_profiles(rows: Vec<ProfileRow>) -> AppResult<Vec<Profile>> {
    rows.into_iter().map(Profile::try_from).collect()
}
