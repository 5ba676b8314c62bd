//! Ministry management.

use std::sync::Arc;

use servir_core::{AppError, AppResult, ChurchId};
use servir_domain::{Ministry, MinistryId, ProfileId};

use crate::ports::MinistryRepository;

#[cfg(test)]
mod tests;

/// Application service for ministries.
#[derive(Clone)]
pub struct MinistryService {
    ministry_repository: Arc<dyn MinistryRepository>,
}

impl MinistryService {
    /// Creates a new ministry service.
    #[must_use]
    pub fn new(ministry_repository: Arc<dyn MinistryRepository>) -> Self {
        Self {
            ministry_repository,
        }
    }

    /// Creates a ministry.
    pub async fn create_ministry(
        &self,
        church_id: ChurchId,
        name: String,
        description: Option<String>,
        leader_profile_id: Option<ProfileId>,
    ) -> AppResult<Ministry> {
        if name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".to_owned()));
        }

        let ministry = Ministry {
            id: MinistryId::new(),
            church_id,
            name,
            description,
            leader_profile_id,
        };
        self.ministry_repository.create(ministry.clone()).await?;
        Ok(ministry)
    }

    /// Updates a ministry's name, description and leader.
    pub async fn update_ministry(
        &self,
        ministry_id: MinistryId,
        name: String,
        description: Option<String>,
        leader_profile_id: Option<ProfileId>,
    ) -> AppResult<Ministry> {
        if name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".to_owned()));
        }

        let existing = self
            .ministry_repository
            .find_by_id(ministry_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("ministry '{ministry_id}' does not exist"))
            })?;

        let ministry = Ministry {
            name,
            description,
            leader_profile_id,
            ..existing
        };
        self.ministry_repository.update(ministry.clone()).await?;
        Ok(ministry)
    }

    /// Deletes a ministry.
    pub async fn delete_ministry(&self, ministry_id: MinistryId) -> AppResult<()> {
        self.ministry_repository
            .find_by_id(ministry_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("ministry '{ministry_id}' does not exist"))
            })?;

        self.ministry_repository.delete(ministry_id).await
    }

    /// Returns a ministry by id, if it exists.
    pub async fn find_ministry(&self, ministry_id: MinistryId) -> AppResult<Option<Ministry>> {
        self.ministry_repository.find_by_id(ministry_id).await
    }

    /// Lists a church's ministries, ordered by name.
    pub async fn list_ministries(&self, church_id: ChurchId) -> AppResult<Vec<Ministry>> {
        self.ministry_repository.list_by_church(church_id).await
    }
}
