use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use servir_core::ChurchId;
use uuid::Uuid;

use crate::ministry::MinistryId;
use crate::profile::ProfileId;

/// Unique identifier for a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleId(Uuid);

impl ScheduleId {
    /// Creates a new random schedule identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a schedule identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ScheduleId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ScheduleId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Unique identifier for a service time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceTimeId(Uuid);

impl ServiceTimeId {
    /// Creates a new random service time identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a service time identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ServiceTimeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ServiceTimeId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A recurring service slot in the week (e.g. Sunday 19:00).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTime {
    /// Unique service time identifier.
    pub id: ServiceTimeId,
    /// Church the service time belongs to.
    pub church_id: ChurchId,
    /// Day of the week (storage string, e.g. "sunday").
    pub day_of_week: String,
    /// Clock time (storage string, e.g. "19:00").
    pub time: String,
    /// Optional label (e.g. "Evening celebration").
    pub name: Option<String>,
}

/// An assignment-bearing event: one ministry, one date, one service time.
///
/// Immutable once created; the date carries no time-of-day semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Unique schedule identifier.
    pub id: ScheduleId,
    /// Church the schedule belongs to.
    pub church_id: ChurchId,
    /// Ministry being scheduled.
    pub ministry_id: MinistryId,
    /// Calendar date of the service.
    pub date: NaiveDate,
    /// Service time of the event.
    pub service_time_id: ServiceTimeId,
    /// Profile that created the schedule, if recorded.
    pub created_by_profile_id: Option<ProfileId>,
}
