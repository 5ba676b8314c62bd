use std::collections::{HashMap, HashSet};

use tracing::warn;

use servir_core::AppResult;
use servir_domain::{AvailabilityStatus, MinistryId, ProfileId, Role, Schedule};

use super::{ResolvedCandidate, SubstitutionService};

impl SubstitutionService {
    /// Computes the set of profiles eligible to fill a slot on `schedule`.
    ///
    /// A profile is excluded when it already holds an active assignment on
    /// the schedule (no double-booking the same slot) or has marked itself
    /// unavailable for the date. `available` and `uninformed` are both
    /// eligible. Output is ordered name ascending, profile id as tiebreak,
    /// so suggestions stay stable across calls.
    pub(super) async fn resolve(
        &self,
        schedule: &Schedule,
        ministry_id: MinistryId,
    ) -> AppResult<Vec<ResolvedCandidate>> {
        let roles: &[Role] = if self.policy.include_leaders {
            &[Role::Volunteer, Role::Leader]
        } else {
            &[Role::Volunteer]
        };

        // The membership read is the one fetch this resolution cannot do
        // without; its failure aborts the operation.
        let members = self
            .profile_repository
            .find_by_ministry_and_roles(ministry_id, roles)
            .await?;

        if members.is_empty() {
            return Ok(Vec::new());
        }

        let member_ids: Vec<ProfileId> = members.iter().map(|profile| profile.id).collect();

        // Availability and assignment reads fail open: a missing dimension
        // degrades the suggestion, it does not abort it.
        let availability: HashMap<ProfileId, AvailabilityStatus> = match self
            .availability_repository
            .find_for_date(schedule.date, &member_ids)
            .await
        {
            Ok(entries) => entries
                .into_iter()
                .map(|entry| (entry.profile_id, entry.status))
                .collect(),
            Err(error) => {
                warn!(date = %schedule.date, %error, "availability lookup failed, treating all candidates as uninformed");
                HashMap::new()
            }
        };

        let assigned: HashSet<ProfileId> = match self
            .assignment_repository
            .find_active_by_schedule(schedule.id)
            .await
        {
            Ok(assignments) => assignments
                .into_iter()
                .map(|assignment| assignment.profile_id)
                .collect(),
            Err(error) => {
                warn!(schedule_id = %schedule.id, %error, "active assignment lookup failed, treating schedule as unassigned");
                HashSet::new()
            }
        };

        let mut candidates: Vec<ResolvedCandidate> = members
            .iter()
            .filter(|profile| !assigned.contains(&profile.id))
            .filter_map(|profile| {
                let status = availability
                    .get(&profile.id)
                    .copied()
                    .unwrap_or(AvailabilityStatus::Uninformed);

                (status != AvailabilityStatus::Unavailable)
                    .then(|| ResolvedCandidate::from_profile(profile, status))
            })
            .collect();

        candidates.sort_by(|left, right| {
            left.view
                .name
                .cmp(&right.view.name)
                .then_with(|| left.view.profile_id.cmp(&right.view.profile_id))
        });

        Ok(candidates)
    }
}
