use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use servir_core::{AppResult, ChurchId};
use servir_domain::{
    Assignment, AssignmentId, AssignmentStatus, AvailabilityEntry, Ministry, MinistryId, Profile,
    ProfileId, Role, Schedule, ScheduleId, ServiceTime, ServiceTimeId,
};

/// Input for creating a profile record.
#[derive(Debug, Clone)]
pub struct NewProfile {
    /// Church the profile belongs to.
    pub church_id: ChurchId,
    /// Display name.
    pub name: String,
    /// Contact email, if provided.
    pub email: Option<String>,
    /// Contact phone, if provided.
    pub phone: Option<String>,
    /// Role within the church.
    pub role: Role,
    /// Ministries the profile serves in.
    pub ministry_ids: Vec<MinistryId>,
    /// SHA-256 hash of the volunteer login PIN, if issued.
    pub pin_hash: Option<String>,
    /// Argon2id hash of the leader password, if set.
    pub password_hash: Option<String>,
}

/// Mutable profile fields for an administrative update.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    /// New display name.
    pub name: String,
    /// New contact email; `None` leaves the stored email untouched.
    pub email: Option<String>,
    /// New contact phone.
    pub phone: Option<String>,
    /// New ministry membership set.
    pub ministry_ids: Vec<MinistryId>,
    /// New role.
    pub role: Role,
}

/// A profile together with its stored login credential hashes.
#[derive(Debug, Clone)]
pub struct ProfileAccount {
    /// The profile record.
    pub profile: Profile,
    /// Argon2id password hash, when the profile logs in with a password.
    pub password_hash: Option<String>,
}

/// Repository port for profile persistence.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Finds a profile by its unique identifier.
    async fn find_by_id(&self, profile_id: ProfileId) -> AppResult<Option<Profile>>;

    /// Finds profiles whose ministry set contains `ministry_id` and whose
    /// role is one of `roles`.
    async fn find_by_ministry_and_roles(
        &self,
        ministry_id: MinistryId,
        roles: &[Role],
    ) -> AppResult<Vec<Profile>>;

    /// Finds the volunteer whose stored PIN hash equals `pin_hash`.
    async fn find_volunteer_by_pin_hash(&self, pin_hash: &str) -> AppResult<Option<Profile>>;

    /// Finds a managing-role account by email (case-insensitive).
    async fn find_account_by_email(&self, email: &str) -> AppResult<Option<ProfileAccount>>;

    /// Creates a profile record. Returns the stored profile.
    async fn create(&self, input: NewProfile) -> AppResult<Profile>;

    /// Applies an administrative profile update.
    async fn update(&self, profile_id: ProfileId, changes: ProfileUpdate) -> AppResult<()>;

    /// Replaces the stored PIN hash.
    async fn update_pin_hash(&self, profile_id: ProfileId, pin_hash: &str) -> AppResult<()>;

    /// Lists every profile in a church, name ascending.
    async fn list_by_church(&self, church_id: ChurchId) -> AppResult<Vec<Profile>>;
}

/// Repository port for ministry persistence.
#[async_trait]
pub trait MinistryRepository: Send + Sync {
    /// Finds a ministry by its unique identifier.
    async fn find_by_id(&self, ministry_id: MinistryId) -> AppResult<Option<Ministry>>;

    /// Creates a ministry record.
    async fn create(&self, ministry: Ministry) -> AppResult<()>;

    /// Updates name, description, and leader of a ministry.
    async fn update(&self, ministry: Ministry) -> AppResult<()>;

    /// Deletes a ministry record.
    async fn delete(&self, ministry_id: MinistryId) -> AppResult<()>;

    /// Lists every ministry in a church, name ascending.
    async fn list_by_church(&self, church_id: ChurchId) -> AppResult<Vec<Ministry>>;
}

/// Repository port for service time persistence.
#[async_trait]
pub trait ServiceTimeRepository: Send + Sync {
    /// Creates a service time record.
    async fn create(&self, service_time: ServiceTime) -> AppResult<()>;

    /// Lists every service time in a church, day of week ascending.
    async fn list_by_church(&self, church_id: ChurchId) -> AppResult<Vec<ServiceTime>>;

    /// Finds a service time by its unique identifier.
    async fn find_by_id(&self, service_time_id: ServiceTimeId) -> AppResult<Option<ServiceTime>>;
}

/// Repository port for schedule persistence.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Finds a schedule by its unique identifier.
    async fn find_by_id(&self, schedule_id: ScheduleId) -> AppResult<Option<Schedule>>;

    /// Creates a schedule record.
    async fn create(&self, schedule: Schedule) -> AppResult<()>;

    /// Lists every schedule in a church, date ascending.
    async fn list_by_church(&self, church_id: ChurchId) -> AppResult<Vec<Schedule>>;
}

/// Replacement values for the answer timestamps of an assignment.
///
/// Every field is written as given: `None` clears the stored value, which
/// is how a resend wipes a previous confirmation or decline.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentTimestamps {
    /// When the volunteer confirmed.
    pub confirmed_at: Option<DateTime<Utc>>,
    /// When the volunteer declined.
    pub declined_at: Option<DateTime<Utc>>,
    /// When the assignment was cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// Assignment totals per status for a church.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentStatusCounts {
    /// Number of confirmed assignments.
    pub confirmed: u64,
    /// Number of pending assignments.
    pub pending: u64,
    /// Number of declined assignments.
    pub declined: u64,
}

/// Repository port for assignment persistence.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Finds an assignment by its unique identifier.
    async fn find_by_id(&self, assignment_id: AssignmentId) -> AppResult<Option<Assignment>>;

    /// Inserts an assignment with the given status.
    ///
    /// Fails with [`servir_core::AppError::Conflict`] when an active
    /// assignment for the same (schedule, profile) pair already exists.
    async fn insert(
        &self,
        schedule_id: ScheduleId,
        profile_id: ProfileId,
        status: AssignmentStatus,
    ) -> AppResult<Assignment>;

    /// Lists active (pending or confirmed) assignments for one schedule.
    async fn find_active_by_schedule(&self, schedule_id: ScheduleId)
    -> AppResult<Vec<Assignment>>;

    /// Lists active (pending or confirmed) assignments across every
    /// schedule on the given date.
    async fn find_active_by_date(&self, date: NaiveDate) -> AppResult<Vec<Assignment>>;

    /// Lists all assignments for one schedule, any status.
    async fn find_by_schedule(&self, schedule_id: ScheduleId) -> AppResult<Vec<Assignment>>;

    /// Lists a profile's assignments, oldest first.
    async fn find_by_profile(&self, profile_id: ProfileId) -> AppResult<Vec<Assignment>>;

    /// Overwrites status and answer timestamps of an assignment.
    async fn update_status(
        &self,
        assignment_id: AssignmentId,
        status: AssignmentStatus,
        timestamps: AssignmentTimestamps,
    ) -> AppResult<()>;

    /// Counts assignments per status across a church.
    async fn status_counts(&self, church_id: ChurchId) -> AppResult<AssignmentStatusCounts>;
}

/// Repository port for availability persistence.
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Lists availability records for one date restricted to the given
    /// profiles. Profiles without a record are simply absent.
    async fn find_for_date(
        &self,
        date: NaiveDate,
        profile_ids: &[ProfileId],
    ) -> AppResult<Vec<AvailabilityEntry>>;

    /// Inserts or replaces the record for the entry's (profile, date) pair.
    async fn upsert(&self, church_id: ChurchId, entry: AvailabilityEntry) -> AppResult<()>;

    /// Lists every availability record a profile has stored.
    async fn list_for_profile(&self, profile_id: ProfileId) -> AppResult<Vec<AvailabilityEntry>>;
}
