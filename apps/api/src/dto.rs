//! Wire types exported to the TypeScript frontend, with conversions from
//! domain and application types.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use servir_application::{AssignmentStatusCounts, CandidateView, SubstituteSuggestion};
use servir_core::UserIdentity;
use servir_domain::{Assignment, AvailabilityEntry, Ministry, Profile, Schedule, ServiceTime};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Incoming payload for volunteer PIN login.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/pin-login-request.ts"
)]
pub struct PinLoginRequest {
    pub pin: String,
}

/// Incoming payload for leader email/password login.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/leader-login-request.ts"
)]
pub struct LeaderLoginRequest {
    pub email: String,
    pub password: String,
}

/// Incoming payload for volunteer creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-volunteer-request.ts"
)]
pub struct CreateVolunteerRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub ministry_ids: Vec<String>,
}

/// Incoming payload for leader account creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-leader-request.ts"
)]
pub struct CreateLeaderRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub ministry_ids: Vec<String>,
}

/// Incoming payload for profile updates. A missing email leaves the stored
/// value untouched.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-profile-request.ts"
)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub ministry_ids: Vec<String>,
    pub role: String,
}

/// Incoming payload for ministry creation and updates.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-ministry-request.ts"
)]
pub struct SaveMinistryRequest {
    pub name: String,
    pub description: Option<String>,
    pub leader_profile_id: Option<String>,
}

/// Incoming payload for service time creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-service-time-request.ts"
)]
pub struct CreateServiceTimeRequest {
    pub day_of_week: String,
    pub time: String,
    pub name: Option<String>,
}

/// Incoming payload for schedule creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-schedule-request.ts"
)]
pub struct CreateScheduleRequest {
    pub ministry_id: String,
    /// ISO date, for example `2026-03-08`.
    pub date: String,
    pub service_time_id: String,
    pub volunteer_ids: Vec<String>,
}

/// Incoming payload for substitute suggestions.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/suggest-substitutes-request.ts"
)]
pub struct SuggestSubstitutesRequest {
    pub ministry_id: String,
}

/// Incoming payload for applying a substitution.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assign-substitute-request.ts"
)]
pub struct AssignSubstituteRequest {
    pub profile_id: String,
    pub old_assignment_id: Option<String>,
}

/// Incoming payload for recording availability.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/set-availability-request.ts"
)]
pub struct SetAvailabilityRequest {
    /// ISO date, for example `2026-03-08`.
    pub date: String,
    pub status: String,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Generic success message.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/generic-message-response.ts"
)]
pub struct GenericMessageResponse {
    pub message: String,
}

/// Session identity returned by login and `/auth/me`.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-identity-response.ts"
)]
pub struct UserIdentityResponse {
    pub subject: String,
    pub display_name: String,
    pub role: String,
    pub church_id: String,
}

impl From<UserIdentity> for UserIdentityResponse {
    fn from(identity: UserIdentity) -> Self {
        Self {
            subject: identity.subject().to_owned(),
            display_name: identity.display_name().to_owned(),
            role: identity.role().to_owned(),
            church_id: identity.church_id().to_string(),
        }
    }
}

/// A church member.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/profile-response.ts"
)]
pub struct ProfileResponse {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub role: String,
    pub ministry_ids: Vec<String>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id.to_string(),
            name: profile.name,
            email: profile.email,
            phone: profile.phone,
            avatar_url: profile.avatar_url,
            role: profile.role.as_str().to_owned(),
            ministry_ids: profile
                .ministry_ids
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// A created volunteer with the plaintext PIN, returned exactly once.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/volunteer-created-response.ts"
)]
pub struct VolunteerCreatedResponse {
    pub profile: ProfileResponse,
    pub pin: String,
}

/// A freshly reset PIN, returned exactly once.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/pin-reset-response.ts"
)]
pub struct PinResetResponse {
    pub pin: String,
}

/// A ministry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/ministry-response.ts"
)]
pub struct MinistryResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub leader_profile_id: Option<String>,
}

impl From<Ministry> for MinistryResponse {
    fn from(ministry: Ministry) -> Self {
        Self {
            id: ministry.id.to_string(),
            name: ministry.name,
            description: ministry.description,
            leader_profile_id: ministry.leader_profile_id.map(|id| id.to_string()),
        }
    }
}

/// A recurring service slot.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/service-time-response.ts"
)]
pub struct ServiceTimeResponse {
    pub id: String,
    pub day_of_week: String,
    pub time: String,
    pub name: Option<String>,
}

impl From<ServiceTime> for ServiceTimeResponse {
    fn from(service_time: ServiceTime) -> Self {
        Self {
            id: service_time.id.to_string(),
            day_of_week: service_time.day_of_week,
            time: service_time.time,
            name: service_time.name,
        }
    }
}

/// One volunteer's slot on a schedule.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assignment-response.ts"
)]
pub struct AssignmentResponse {
    pub id: String,
    pub schedule_id: String,
    pub profile_id: String,
    pub status: String,
    pub created_at: String,
    pub confirmed_at: Option<String>,
    pub declined_at: Option<String>,
    pub cancelled_at: Option<String>,
}

impl From<Assignment> for AssignmentResponse {
    fn from(assignment: Assignment) -> Self {
        Self {
            id: assignment.id.to_string(),
            schedule_id: assignment.schedule_id.to_string(),
            profile_id: assignment.profile_id.to_string(),
            status: assignment.status.as_str().to_owned(),
            created_at: assignment.created_at.to_rfc3339(),
            confirmed_at: assignment.confirmed_at.map(|at| at.to_rfc3339()),
            declined_at: assignment.declined_at.map(|at| at.to_rfc3339()),
            cancelled_at: assignment.cancelled_at.map(|at| at.to_rfc3339()),
        }
    }
}

/// A schedule with its assignments.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/schedule-response.ts"
)]
pub struct ScheduleResponse {
    pub id: String,
    pub ministry_id: String,
    pub date: String,
    pub service_time_id: String,
    pub assignments: Vec<AssignmentResponse>,
}

impl ScheduleResponse {
    pub fn from_parts(schedule: Schedule, assignments: Vec<Assignment>) -> Self {
        Self {
            id: schedule.id.to_string(),
            ministry_id: schedule.ministry_id.to_string(),
            date: schedule.date.to_string(),
            service_time_id: schedule.service_time_id.to_string(),
            assignments: assignments
                .into_iter()
                .map(AssignmentResponse::from)
                .collect(),
        }
    }
}

/// One substitute candidate or roster entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/candidate-response.ts"
)]
pub struct CandidateResponse {
    pub profile_id: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub availability: String,
    pub already_assigned: bool,
}

impl From<CandidateView> for CandidateResponse {
    fn from(candidate: CandidateView) -> Self {
        Self {
            profile_id: candidate.profile_id.to_string(),
            name: candidate.name,
            avatar_url: candidate.avatar_url,
            availability: candidate.availability.as_str().to_owned(),
            already_assigned: candidate.already_assigned,
        }
    }
}

/// Ranked substitute suggestion.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/suggestion-response.ts"
)]
pub struct SuggestionResponse {
    pub candidates: Vec<CandidateResponse>,
    pub reasoning: String,
}

impl From<SubstituteSuggestion> for SuggestionResponse {
    fn from(suggestion: SubstituteSuggestion) -> Self {
        Self {
            candidates: suggestion
                .candidates
                .into_iter()
                .map(CandidateResponse::from)
                .collect(),
            reasoning: suggestion.reasoning,
        }
    }
}

/// One recorded availability answer.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/availability-entry-response.ts"
)]
pub struct AvailabilityEntryResponse {
    pub date: String,
    pub status: String,
}

impl From<AvailabilityEntry> for AvailabilityEntryResponse {
    fn from(entry: AvailabilityEntry) -> Self {
        Self {
            date: entry.date.to_string(),
            status: entry.status.as_str().to_owned(),
        }
    }
}

/// Dashboard assignment totals.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assignment-counts-response.ts"
)]
pub struct AssignmentCountsResponse {
    pub confirmed: u64,
    pub pending: u64,
    pub declined: u64,
}

impl From<AssignmentStatusCounts> for AssignmentCountsResponse {
    fn from(counts: AssignmentStatusCounts) -> Self {
        Self {
            confirmed: counts.confirmed,
            pending: counts.pending,
            declined: counts.declined,
        }
    }
}
