//! Assignment lifecycle and its status state machine.
//!
//! At most one active (pending or confirmed) assignment may exist per
//! (schedule, profile) pair; storage enforces that with a partial unique
//! index. Status changes go through [`AssignmentStatus::can_transition`]
//! so an illegal overwrite (e.g. cancelled back to confirmed) is rejected
//! instead of silently applied.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use servir_core::AppError;
use uuid::Uuid;

use crate::profile::ProfileId;
use crate::schedule::ScheduleId;

/// Unique identifier for an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentId(Uuid);

impl AssignmentId {
    /// Creates a new random assignment identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an assignment identifier from an existing UUID value.
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

impl Default for AssignmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AssignmentId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Lifecycle status of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// Invitation sent, volunteer has not answered yet.
    Pending,
    /// Volunteer accepted.
    Confirmed,
    /// Volunteer declined.
    Declined,
    /// Replaced by a substitute or withdrawn by a leader. Terminal.
    Cancelled,
}

impl AssignmentStatus {
    /// Returns the canonical storage string for the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Declined => "declined",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the assignment still occupies a slot on its schedule.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Whether moving from `self` to `target` is a legal transition.
    ///
    /// Legal moves: pending to confirmed or declined (volunteer answer),
    /// confirmed to declined (late cancel), declined or confirmed back to
    /// pending (resend, with pending-to-pending allowed so resend is
    /// idempotent), and any non-terminal status to cancelled.
    #[must_use]
    pub fn can_transition(&self, target: Self) -> bool {
        match (self, target) {
            (Self::Cancelled, _) => false,
            (_, Self::Cancelled) => true,
            (Self::Pending, Self::Confirmed | Self::Declined | Self::Pending) => true,
            (Self::Confirmed, Self::Declined | Self::Pending) => true,
            (Self::Declined, Self::Pending) => true,
            _ => false,
        }
    }
}

impl FromStr for AssignmentStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "declined" => Ok(Self::Declined),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(AppError::Validation(format!(
                "unknown assignment status '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// The association of one volunteer with one schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique assignment identifier.
    pub id: AssignmentId,
    /// Schedule being served.
    pub schedule_id: ScheduleId,
    /// Volunteer serving.
    pub profile_id: ProfileId,
    /// Current lifecycle status.
    pub status: AssignmentStatus,
    /// Record creation time.
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// When the volunteer confirmed, if they did.
    pub confirmed_at: Option<chrono::DateTime<chrono::Utc>>,
    /// When the volunteer declined, if they did.
    pub declined_at: Option<chrono::DateTime<chrono::Utc>>,
    /// When the assignment was cancelled, if it was.
    pub cancelled_at: Option<chrono::DateTime<chrono::Utc>>,
}
