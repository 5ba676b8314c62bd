//! Volunteer self-service availability.

use std::sync::Arc;

use chrono::NaiveDate;

use servir_core::{AppResult, ChurchId};
use servir_domain::{AvailabilityEntry, AvailabilityStatus, ProfileId};

use crate::ports::AvailabilityRepository;


/// Application service for a volunteer's own availability calendar.
#[derive(Clone)]
pub struct AvailabilityService {
    availability_repository: Arc<dyn AvailabilityRepository>,
}

impl AvailabilityService {
    /// Creates a new availability service.
    #[must_use]
    pub fn new(availability_repository: Arc<dyn AvailabilityRepository>) -> Self {
        Self {
            availability_repository,
        }
    }

    /// Records a volunteer's availability for a date, replacing any earlier
    /// answer for the same date.
    pub async fn set_availability(
        &self,
        church_id: ChurchId,
        profile_id: ProfileId,
        date: NaiveDate,
        status: AvailabilityStatus,
    ) -> AppResult<()> {
        self.availability_repository
            .upsert(
                church_id,
                AvailabilityEntry {
                    profile_id,
                    date,
                    status,
                },
            )
            .await
    }

    /// Lists everything a volunteer has recorded, ordered by date.
    pub async fn list_for_profile(
        &self,
        profile_id: ProfileId,
    ) -> AppResult<Vec<AvailabilityEntry>> {
        let mut entries = self
            .availability_repository
            .list_for_profile(profile_id)
            .await?;
        entries.sort_by_key(|entry| entry.date);
        Ok(entries)
    }
}
