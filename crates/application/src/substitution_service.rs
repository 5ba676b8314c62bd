//! Substitute finding and assignment consistency.
//!
//! Three cooperating pieces, each stateless per call:
//! - the candidate resolver cross-references ministry membership, per-date
//!   availability, and existing assignment state;
//! - the ranking adapter optionally reorders the top candidates through a
//!   generative text capability and falls back deterministically when that
//!   capability is absent or misbehaves;
//! - the assignment mutator performs the cancel-then-insert substitution
//!   transition, resend, and validated status changes.

use std::sync::Arc;

use serde::Serialize;

use servir_core::AppResult;
use servir_domain::{AvailabilityStatus, MinistryId, Profile, ProfileId, ScheduleId};

use crate::ports::{
    AssignmentRepository, AvailabilityRepository, ProfileRepository, ScheduleRepository,
    TextGenerator,
};

mod candidates;
mod mutate;
mod ranking;

pub use ranking::extract_ranked_ids;

/// How many candidates a suggestion returns at most.
pub const MAX_SUGGESTIONS: usize = 3;

/// Policy knobs for candidate resolution.
#[derive(Debug, Clone, Copy)]
pub struct SubstitutionPolicy {
    /// Whether leaders are eligible as substitute candidates alongside
    /// volunteers. Deliberately a flag, not a hardcoded filter.
    pub include_leaders: bool,
}

impl Default for SubstitutionPolicy {
    fn default() -> Self {
        Self {
            include_leaders: false,
        }
    }
}

/// One eligible substitute, annotated for the leader-facing UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateView {
    /// Candidate profile id.
    pub profile_id: ProfileId,
    /// Candidate display name.
    pub name: String,
    /// Candidate avatar URL, if any.
    pub avatar_url: Option<String>,
    /// Raw availability status for the schedule date.
    pub availability: AvailabilityStatus,
    /// Whether the profile already holds an active assignment on the
    /// schedule in question. The UI disables such entries rather than
    /// hiding them.
    pub already_assigned: bool,
}

/// Resolver output enriched with the data the ranking prompt needs.
#[derive(Debug, Clone)]
struct ResolvedCandidate {
    view: CandidateView,
    ministry_ids: Vec<MinistryId>,
}

impl ResolvedCandidate {
    fn from_profile(profile: &Profile, availability: AvailabilityStatus) -> Self {
        Self {
            view: CandidateView {
                profile_id: profile.id,
                name: profile.name.clone(),
                avatar_url: profile.avatar_url.clone(),
                availability,
                already_assigned: false,
            },
            ministry_ids: profile.ministry_ids.clone(),
        }
    }
}

/// Ranked substitute suggestions plus a human-readable explanation.
///
/// An empty candidate list is an expected outcome, not an error; the
/// reasoning string tells the difference between "nobody in this ministry"
/// and "everyone is booked or unavailable".
#[derive(Debug, Clone, Serialize)]
pub struct SubstituteSuggestion {
    /// Up to [`MAX_SUGGESTIONS`] candidates, best first.
    pub candidates: Vec<CandidateView>,
    /// Why these candidates, in UI-ready prose.
    pub reasoning: String,
}

/// Application service for substitute suggestions and assignment mutation.
#[derive(Clone)]
pub struct SubstitutionService {
    schedule_repository: Arc<dyn ScheduleRepository>,
    profile_repository: Arc<dyn ProfileRepository>,
    availability_repository: Arc<dyn AvailabilityRepository>,
    assignment_repository: Arc<dyn AssignmentRepository>,
    ranker: Option<Arc<dyn TextGenerator>>,
    policy: SubstitutionPolicy,
}

impl SubstitutionService {
    /// Creates a new substitution service.
    ///
    /// `ranker` is optional: without it every suggestion uses the
    /// deterministic resolver order.
    #[must_use]
    pub fn new(
        schedule_repository: Arc<dyn ScheduleRepository>,
        profile_repository: Arc<dyn ProfileRepository>,
        availability_repository: Arc<dyn AvailabilityRepository>,
        assignment_repository: Arc<dyn AssignmentRepository>,
        ranker: Option<Arc<dyn TextGenerator>>,
        policy: SubstitutionPolicy,
    ) -> Self {
        Self {
            schedule_repository,
            profile_repository,
            availability_repository,
            assignment_repository,
            ranker,
            policy,
        }
    }

    /// Resolves and ranks substitute candidates for a vacated slot.
    ///
    /// Fails only when the schedule does not exist or the ministry
    /// membership read fails; degraded availability or assignment reads and
    /// every ranking failure are absorbed into the fallback ordering.
    pub async fn suggest_substitutes(
        &self,
        schedule_id: ScheduleId,
        ministry_id: MinistryId,
    ) -> AppResult<SubstituteSuggestion> {
        let schedule = self
            .schedule_repository
            .find_by_id(schedule_id)
            .await?
            .ok_or_else(|| {
                servir_core::AppError::NotFound(format!("schedule '{schedule_id}' does not exist"))
            })?;

        let resolved = self.resolve(&schedule, ministry_id).await?;
        Ok(self.rank(&schedule, ministry_id, resolved).await)
    }

    /// Resolves the full eligible-candidate list in deterministic order,
    /// without ranking or truncation.
    pub async fn resolve_candidates(
        &self,
        schedule_id: ScheduleId,
        ministry_id: MinistryId,
    ) -> AppResult<Vec<CandidateView>> {
        let schedule = self
            .schedule_repository
            .find_by_id(schedule_id)
            .await?
            .ok_or_else(|| {
                servir_core::AppError::NotFound(format!("schedule '{schedule_id}' does not exist"))
            })?;

        let resolved = self.resolve(&schedule, ministry_id).await?;
        Ok(resolved.into_iter().map(|candidate| candidate.view).collect())
    }

    /// Returns an assignment by id, if it exists.
    pub async fn find_assignment(
        &self,
        assignment_id: servir_domain::AssignmentId,
    ) -> AppResult<Option<servir_domain::Assignment>> {
        self.assignment_repository.find_by_id(assignment_id).await
    }
}
