//! Fake port implementations shared by the service test modules.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;

use servir_core::{AppError, AppResult, ChurchId};
use servir_domain::{
    Assignment, AssignmentId, AssignmentStatus, AvailabilityEntry, Ministry, MinistryId, Profile,
    ProfileId, Role, Schedule, ScheduleId, ServiceTime, ServiceTimeId,
};

use crate::account_service::PasswordHasher;
use crate::ports::{
    AssignmentRepository, AssignmentStatusCounts, AssignmentTimestamps, AvailabilityRepository,
    MinistryRepository, NewProfile, ProfileAccount, ProfileRepository, ProfileUpdate,
    ScheduleRepository, ServiceTimeRepository, TextGenerator,
};

#[derive(Default)]
pub(crate) struct FakeScheduleRepository {
    pub(crate) schedules: Mutex<Vec<Schedule>>,
}

#[async_trait]
impl ScheduleRepository for FakeScheduleRepository {
    async fn find_by_id(&self, schedule_id: ScheduleId) -> AppResult<Option<Schedule>> {
        Ok(self
            .schedules
            .lock()
            .await
            .iter()
            .find(|schedule| schedule.id == schedule_id)
            .cloned())
    }

    async fn create(&self, schedule: Schedule) -> AppResult<()> {
        self.schedules.lock().await.push(schedule);
        Ok(())
    }

    async fn list_by_church(&self, church_id: ChurchId) -> AppResult<Vec<Schedule>> {
        let mut schedules: Vec<Schedule> = self
            .schedules
            .lock()
            .await
            .iter()
            .filter(|schedule| schedule.church_id == church_id)
            .cloned()
            .collect();
        schedules.sort_by_key(|schedule| schedule.date);
        Ok(schedules)
    }
}

#[derive(Default)]
pub(crate) struct FakeServiceTimeRepository {
    pub(crate) service_times: Mutex<Vec<ServiceTime>>,
}

#[async_trait]
impl ServiceTimeRepository for FakeServiceTimeRepository {
    async fn create(&self, service_time: ServiceTime) -> AppResult<()> {
        self.service_times.lock().await.push(service_time);
        Ok(())
    }

    async fn list_by_church(&self, church_id: ChurchId) -> AppResult<Vec<ServiceTime>> {
        Ok(self
            .service_times
            .lock()
            .await
            .iter()
            .filter(|service_time| service_time.church_id == church_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        service_time_id: ServiceTimeId,
    ) -> AppResult<Option<ServiceTime>> {
        Ok(self
            .service_times
            .lock()
            .await
            .iter()
            .find(|service_time| service_time.id == service_time_id)
            .cloned())
    }
}

#[derive(Default)]
pub(crate) struct FakeMinistryRepository {
    pub(crate) ministries: Mutex<Vec<Ministry>>,
}

#[async_trait]
impl MinistryRepository for FakeMinistryRepository {
    async fn find_by_id(&self, ministry_id: MinistryId) -> AppResult<Option<Ministry>> {
        Ok(self
            .ministries
            .lock()
            .await
            .iter()
            .find(|ministry| ministry.id == ministry_id)
            .cloned())
    }

    async fn create(&self, ministry: Ministry) -> AppResult<()> {
        self.ministries.lock().await.push(ministry);
        Ok(())
    }

    async fn update(&self, ministry: Ministry) -> AppResult<()> {
        let mut ministries = self.ministries.lock().await;
        let stored = ministries
            .iter_mut()
            .find(|stored| stored.id == ministry.id)
            .ok_or_else(|| AppError::NotFound(format!("ministry '{}'", ministry.id)))?;
        *stored = ministry;
        Ok(())
    }

    async fn delete(&self, ministry_id: MinistryId) -> AppResult<()> {
        self.ministries
            .lock()
            .await
            .retain(|ministry| ministry.id != ministry_id);
        Ok(())
    }

    async fn list_by_church(&self, church_id: ChurchId) -> AppResult<Vec<Ministry>> {
        let mut ministries: Vec<Ministry> = self
            .ministries
            .lock()
            .await
            .iter()
            .filter(|ministry| ministry.church_id == church_id)
            .cloned()
            .collect();
        ministries.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(ministries)
    }
}

#[derive(Default)]
pub(crate) struct FakeProfileRepository {
    pub(crate) profiles: Mutex<Vec<Profile>>,
    pub(crate) pin_hashes: Mutex<HashMap<ProfileId, String>>,
    pub(crate) password_hashes: Mutex<HashMap<ProfileId, String>>,
    pub(crate) fail_membership: bool,
}

#[async_trait]
impl ProfileRepository for FakeProfileRepository {
    async fn find_by_id(&self, profile_id: ProfileId) -> AppResult<Option<Profile>> {
        Ok(self
            .profiles
            .lock()
            .await
            .iter()
            .find(|profile| profile.id == profile_id)
            .cloned())
    }

    async fn find_by_ministry_and_roles(
        &self,
        ministry_id: MinistryId,
        roles: &[Role],
    ) -> AppResult<Vec<Profile>> {
        if self.fail_membership {
            return Err(AppError::Storage("membership query failed".to_owned()));
        }

        Ok(self
            .profiles
            .lock()
            .await
            .iter()
            .filter(|profile| profile.serves_in(ministry_id) && roles.contains(&profile.role))
            .cloned()
            .collect())
    }

    async fn find_volunteer_by_pin_hash(&self, pin_hash: &str) -> AppResult<Option<Profile>> {
        let pin_hashes = self.pin_hashes.lock().await;
        let profiles = self.profiles.lock().await;
        Ok(profiles
            .iter()
            .find(|profile| {
                profile.role == Role::Volunteer
                    && pin_hashes.get(&profile.id).is_some_and(|stored| stored == pin_hash)
            })
            .cloned())
    }

    async fn find_account_by_email(&self, email: &str) -> AppResult<Option<ProfileAccount>> {
        let password_hashes = self.password_hashes.lock().await;
        let profiles = self.profiles.lock().await;
        Ok(profiles
            .iter()
            .find(|profile| {
                profile
                    .email
                    .as_deref()
                    .is_some_and(|stored| stored.eq_ignore_ascii_case(email))
            })
            .map(|profile| ProfileAccount {
                password_hash: password_hashes.get(&profile.id).cloned(),
                profile: profile.clone(),
            }))
    }

    async fn create(&self, input: NewProfile) -> AppResult<Profile> {
        let profile = Profile {
            id: ProfileId::new(),
            church_id: input.church_id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            avatar_url: None,
            role: input.role,
            ministry_ids: input.ministry_ids,
            created_at: Utc::now(),
        };

        if let Some(pin_hash) = input.pin_hash {
            self.pin_hashes.lock().await.insert(profile.id, pin_hash);
        }
        if let Some(password_hash) = input.password_hash {
            self.password_hashes
                .lock()
                .await
                .insert(profile.id, password_hash);
        }

        self.profiles.lock().await.push(profile.clone());
        Ok(profile)
    }

    async fn update(&self, profile_id: ProfileId, changes: ProfileUpdate) -> AppResult<()> {
        let mut profiles = self.profiles.lock().await;
        let profile = profiles
            .iter_mut()
            .find(|profile| profile.id == profile_id)
            .ok_or_else(|| AppError::NotFound(format!("profile '{profile_id}'")))?;

        profile.name = changes.name;
        if changes.email.is_some() {
            profile.email = changes.email;
        }
        profile.phone = changes.phone;
        profile.ministry_ids = changes.ministry_ids;
        profile.role = changes.role;
        Ok(())
    }

    async fn update_pin_hash(&self, profile_id: ProfileId, pin_hash: &str) -> AppResult<()> {
        self.pin_hashes
            .lock()
            .await
            .insert(profile_id, pin_hash.to_owned());
        Ok(())
    }

    async fn list_by_church(&self, church_id: ChurchId) -> AppResult<Vec<Profile>> {
        let mut profiles: Vec<Profile> = self
            .profiles
            .lock()
            .await
            .iter()
            .filter(|profile| profile.church_id == church_id)
            .cloned()
            .collect();
        profiles.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(profiles)
    }
}

#[derive(Default)]
pub(crate) struct FakeAvailabilityRepository {
    pub(crate) entries: Mutex<Vec<AvailabilityEntry>>,
    pub(crate) fail_reads: bool,
}

#[async_trait]
impl AvailabilityRepository for FakeAvailabilityRepository {
    async fn find_for_date(
        &self,
        date: NaiveDate,
        profile_ids: &[ProfileId],
    ) -> AppResult<Vec<AvailabilityEntry>> {
        if self.fail_reads {
            return Err(AppError::Storage("availability query failed".to_owned()));
        }

        Ok(self
            .entries
            .lock()
            .await
            .iter()
            .filter(|entry| entry.date == date && profile_ids.contains(&entry.profile_id))
            .copied()
            .collect())
    }

    async fn upsert(&self, _church_id: ChurchId, entry: AvailabilityEntry) -> AppResult<()> {
        let mut entries = self.entries.lock().await;
        entries
            .retain(|stored| !(stored.profile_id == entry.profile_id && stored.date == entry.date));
        entries.push(entry);
        Ok(())
    }

    async fn list_for_profile(&self, profile_id: ProfileId) -> AppResult<Vec<AvailabilityEntry>> {
        Ok(self
            .entries
            .lock()
            .await
            .iter()
            .filter(|entry| entry.profile_id == profile_id)
            .copied()
            .collect())
    }
}

#[derive(Default)]
pub(crate) struct FakeAssignmentRepository {
    pub(crate) assignments: Mutex<Vec<Assignment>>,
    pub(crate) schedule_dates: Mutex<HashMap<ScheduleId, NaiveDate>>,
    pub(crate) insert_calls: Mutex<usize>,
    pub(crate) fail_reads: bool,
}

impl FakeAssignmentRepository {
    pub(crate) async fn seed(
        &self,
        schedule_id: ScheduleId,
        profile_id: ProfileId,
        status: AssignmentStatus,
    ) -> Assignment {
        let assignment = Assignment {
            id: AssignmentId::new(),
            schedule_id,
            profile_id,
            status,
            created_at: Utc::now(),
            confirmed_at: None,
            declined_at: None,
            cancelled_at: None,
        };
        self.assignments.lock().await.push(assignment.clone());
        assignment
    }
}

#[async_trait]
impl AssignmentRepository for FakeAssignmentRepository {
    async fn find_by_id(&self, assignment_id: AssignmentId) -> AppResult<Option<Assignment>> {
        Ok(self
            .assignments
            .lock()
            .await
            .iter()
            .find(|assignment| assignment.id == assignment_id)
            .cloned())
    }

    async fn insert(
        &self,
        schedule_id: ScheduleId,
        profile_id: ProfileId,
        status: AssignmentStatus,
    ) -> AppResult<Assignment> {
        *self.insert_calls.lock().await += 1;

        let mut assignments = self.assignments.lock().await;

        // Mirrors the storage layer's partial unique index on active
        // (schedule, profile) pairs.
        let duplicate = assignments.iter().any(|assignment| {
            assignment.schedule_id == schedule_id
                && assignment.profile_id == profile_id
                && assignment.status.is_active()
        });
        if duplicate && status.is_active() {
            return Err(AppError::Conflict(
                "profile already holds an active assignment on this schedule".to_owned(),
            ));
        }

        let assignment = Assignment {
            id: AssignmentId::new(),
            schedule_id,
            profile_id,
            status,
            created_at: Utc::now(),
            confirmed_at: None,
            declined_at: None,
            cancelled_at: None,
        };
        assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn find_active_by_schedule(
        &self,
        schedule_id: ScheduleId,
    ) -> AppResult<Vec<Assignment>> {
        if self.fail_reads {
            return Err(AppError::Storage("assignment query failed".to_owned()));
        }

        Ok(self
            .assignments
            .lock()
            .await
            .iter()
            .filter(|assignment| {
                assignment.schedule_id == schedule_id && assignment.status.is_active()
            })
            .cloned()
            .collect())
    }

    async fn find_active_by_date(&self, date: NaiveDate) -> AppResult<Vec<Assignment>> {
        if self.fail_reads {
            return Err(AppError::Storage("assignment query failed".to_owned()));
        }

        let dates = self.schedule_dates.lock().await;
        Ok(self
            .assignments
            .lock()
            .await
            .iter()
            .filter(|assignment| {
                assignment.status.is_active()
                    && dates.get(&assignment.schedule_id) == Some(&date)
            })
            .cloned()
            .collect())
    }

    async fn find_by_schedule(&self, schedule_id: ScheduleId) -> AppResult<Vec<Assignment>> {
        Ok(self
            .assignments
            .lock()
            .await
            .iter()
            .filter(|assignment| assignment.schedule_id == schedule_id)
            .cloned()
            .collect())
    }

    async fn find_by_profile(&self, profile_id: ProfileId) -> AppResult<Vec<Assignment>> {
        Ok(self
            .assignments
            .lock()
            .await
            .iter()
            .filter(|assignment| assignment.profile_id == profile_id)
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        assignment_id: AssignmentId,
        status: AssignmentStatus,
        timestamps: AssignmentTimestamps,
    ) -> AppResult<()> {
        let mut assignments = self.assignments.lock().await;
        let assignment = assignments
            .iter_mut()
            .find(|assignment| assignment.id == assignment_id)
            .ok_or_else(|| AppError::NotFound(format!("assignment '{assignment_id}'")))?;

        assignment.status = status;
        assignment.confirmed_at = timestamps.confirmed_at;
        assignment.declined_at = timestamps.declined_at;
        assignment.cancelled_at = timestamps.cancelled_at;
        Ok(())
    }

    async fn status_counts(&self, _church_id: ChurchId) -> AppResult<AssignmentStatusCounts> {
        let assignments = self.assignments.lock().await;
        let mut counts = AssignmentStatusCounts::default();
        for assignment in assignments.iter() {
            match assignment.status {
                AssignmentStatus::Confirmed => counts.confirmed += 1,
                AssignmentStatus::Pending => counts.pending += 1,
                AssignmentStatus::Declined => counts.declined += 1,
                AssignmentStatus::Cancelled => {}
            }
        }
        Ok(counts)
    }
}

/// Reversible stand-in for Argon2id. Records how often hashing ran so
/// timing-neutral login paths can be asserted.
#[derive(Default)]
pub(crate) struct FakePasswordHasher {
    pub(crate) hash_calls: std::sync::Mutex<usize>,
}

impl PasswordHasher for FakePasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        if let Ok(mut calls) = self.hash_calls.lock() {
            *calls += 1;
        }
        Ok(format!("hashed:{password}"))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        Ok(hash == format!("hashed:{password}"))
    }
}

pub(crate) struct StubTextGenerator {
    pub(crate) response: Result<String, String>,
}

#[async_trait]
impl TextGenerator for StubTextGenerator {
    async fn generate(&self, _prompt: &str) -> AppResult<String> {
        self.response.clone().map_err(AppError::Internal)
    }
}
