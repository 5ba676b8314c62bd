use super::*;

#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    #[sqlx(flatten)]
    profile: ProfileRow,
    password_hash: Option<String>,
}

impl PostgresProfileRepository {
    pub(super) async fn find_account_by_email_impl(
        &self,
        email: &str,
    ) -> AppResult<Option<ProfileAccount>> {
        let query = format!(
            r"
            SELECT {PROFILE_COLUMNS}, p.password_hash
            FROM profiles p
            LEFT JOIN profile_ministries pm ON pm.profile_id = p.id
            WHERE LOWER(p.email) = LOWER($1)
            GROUP BY p.id
            LIMIT 1
            "
        );

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| {
                AppError::Storage(format!("failed to find account by email: {error}"))
            })?;

        row.map(|row| {
            Ok(ProfileAccount {
                profile: Profile::try_from(row.profile)?,
                password_hash: row.password_hash,
            })
        })
        .transpose()
    }

    pub(super) async fn create_impl(&self, input: NewProfile) -> AppResult<Profile> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Storage(format!("failed to open transaction: {error}"))
        })?;

        let profile_id = ProfileId::new();
        let created_at: chrono::DateTime<chrono::Utc> = sqlx::query_scalar(
            r"
            INSERT INTO profiles (id, church_id, name, email, phone, role, pin_hash, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING created_at
            ",
        )
        .bind(profile_id.as_uuid())
        .bind(input.church_id.as_uuid())
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(input.role.as_str())
        .bind(&input.pin_hash)
        .bind(&input.password_hash)
        .fetch_one(&mut *transaction)
        .await
        .map_err(|error| conflict_or_storage(error, "create profile"))?;

        for ministry_id in &input.ministry_ids {
            sqlx::query(
                r"
                INSERT INTO profile_ministries (profile_id, ministry_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                ",
            )
            .bind(profile_id.as_uuid())
            .bind(ministry_id.as_uuid())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Storage(format!("failed to record ministry membership: {error}"))
            })?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Storage(format!("failed to commit profile creation: {error}"))
        })?;

        Ok(Profile {
            id: profile_id,
            church_id: input.church_id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            avatar_url: None,
            role: input.role,
            ministry_ids: input.ministry_ids,
            created_at,
        })
    }

    pub(super) async fn update_impl(
        &self,
        profile_id: ProfileId,
        changes: ProfileUpdate,
    ) -> AppResult<()> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Storage(format!("failed to open transaction: {error}"))
        })?;

        // A missing email leaves the stored value untouched.
        let result = sqlx::query(
            r"
            UPDATE profiles
            SET name = $2,
                email = COALESCE($3, email),
                phone = $4,
                role = $5
            WHERE id = $1
            ",
        )
        .bind(profile_id.as_uuid())
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(&changes.phone)
        .bind(changes.role.as_str())
        .execute(&mut *transaction)
        .await
        .map_err(|error| conflict_or_storage(error, "update profile"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "profile '{profile_id}' does not exist"
            )));
        }

        sqlx::query("DELETE FROM profile_ministries WHERE profile_id = $1")
            .bind(profile_id.as_uuid())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Storage(format!("failed to clear ministry memberships: {error}"))
            })?;

        for ministry_id in &changes.ministry_ids {
            sqlx::query(
                r"
                INSERT INTO profile_ministries (profile_id, ministry_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                ",
            )
            .bind(profile_id.as_uuid())
            .bind(ministry_id.as_uuid())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Storage(format!("failed to record ministry membership: {error}"))
            })?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Storage(format!("failed to commit profile update: {error}"))
        })
    }

    pub(super) async fn update_pin_hash_impl(
        &self,
        profile_id: ProfileId,
        pin_hash: &str,
    ) -> AppResult<()> {
        let result = sqlx::query("UPDATE profiles SET pin_hash = $2 WHERE id = $1")
            .bind(profile_id.as_uuid())
            .bind(pin_hash)
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Storage(format!("failed to update PIN: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "profile '{profile_id}' does not exist"
            )));
        }

        Ok(())
    }
}

fn conflict_or_storage(error: sqlx::Error, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict("a profile with this email already exists".to_owned());
    }

    AppError::Storage(format!("failed to {operation}: {error}"))
}
