use super::*;

impl PostgresProfileRepository {
    pub(super) async fn find_by_id_impl(
        &self,
        profile_id: ProfileId,
    ) -> AppResult<Option<Profile>> {
        let query = format!(
            r"
            SELECT {PROFILE_COLUMNS}
            FROM profiles p
            LEFT JOIN profile_ministries pm ON pm.profile_id = p.id
            WHERE p.id = $1
            GROUP BY p.id
            "
        );

        let row = sqlx::query_as::<_, ProfileRow>(&query)
            .bind(profile_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| {
                AppError::Storage(format!("failed to find profile by id: {error}"))
            })?;

        row.map(Profile::try_from).transpose()
    }

    pub(super) async fn find_by_ministry_and_roles_impl(
        &self,
        ministry_id: MinistryId,
        roles: &[Role],
    ) -> AppResult<Vec<Profile>> {
        let role_names: Vec<String> = roles.iter().map(|role| role.as_str().to_owned()).collect();

        let query = format!(
            r"
            SELECT {PROFILE_COLUMNS}
            FROM profiles p
            LEFT JOIN profile_ministries pm ON pm.profile_id = p.id
            WHERE p.role = ANY($2)
              AND p.id IN (
                  SELECT profile_id FROM profile_ministries WHERE ministry_id = $1
              )
            GROUP BY p.id
            ORDER BY p.name, p.id
            "
        );

        let rows = sqlx::query_as::<_, ProfileRow>(&query)
            .bind(ministry_id.as_uuid())
            .bind(&role_names)
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Storage(format!("failed to find profiles by ministry: {error}"))
            })?;

        rows_into_profiles(rows)
    }

    pub(super) async fn find_volunteer_by_pin_hash_impl(
        &self,
        pin_hash: &str,
    ) -> AppResult<Option<Profile>> {
        let query = format!(
            r"
            SELECT {PROFILE_COLUMNS}
            FROM profiles p
            LEFT JOIN profile_ministries pm ON pm.profile_id = p.id
            WHERE p.pin_hash = $1 AND p.role = 'volunteer'
            GROUP BY p.id
            LIMIT 1
            "
        );

        let row = sqlx::query_as::<_, ProfileRow>(&query)
            .bind(pin_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| {
                AppError::Storage(format!("failed to find volunteer by PIN: {error}"))
            })?;

        row.map(Profile::try_from).transpose()
    }

    pub(super) async fn list_by_church_impl(&self, church_id: ChurchId) -> AppResult<Vec<Profile>> {
        let query = format!(
            r"
            SELECT {PROFILE_COLUMNS}
            FROM profiles p
            LEFT JOIN profile_ministries pm ON pm.profile_id = p.id
            WHERE p.church_id = $1
            GROUP BY p.id
            ORDER BY p.name, p.id
            "
        );

        let rows = sqlx::query_as::<_, ProfileRow>(&query)
            .bind(church_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|error| AppError::Storage(format!("failed to list profiles: {error}")))?;

        rows_into_profiles(rows)
    }
}
