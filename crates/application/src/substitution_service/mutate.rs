use chrono::Utc;
use tracing::warn;

use servir_core::{AppError, AppResult};
use servir_domain::{Assignment, AssignmentId, AssignmentStatus, ProfileId, ScheduleId};

use crate::ports::AssignmentTimestamps;

use super::SubstitutionService;

impl SubstitutionService {
    /// Replaces the volunteer on a slot: best-effort cancel of the old
    /// assignment, then a fresh pending assignment for the substitute.
    ///
    /// The cancel step is not transactional with the insert; its failure is
    /// logged and does not block the substitution. The insert is the one
    /// write whose failure surfaces, and the storage layer's uniqueness
    /// constraint on active (schedule, profile) pairs is what rejects a
    /// racing duplicate.
    pub async fn assign_substitute(
        &self,
        schedule_id: ScheduleId,
        new_profile_id: ProfileId,
        old_assignment_id: Option<AssignmentId>,
    ) -> AppResult<Assignment> {
        if let Some(assignment_id) = old_assignment_id {
            self.cancel_best_effort(assignment_id).await;
        }

        self.assignment_repository
            .insert(schedule_id, new_profile_id, AssignmentStatus::Pending)
            .await
    }

    async fn cancel_best_effort(&self, assignment_id: AssignmentId) {
        let existing = match self.assignment_repository.find_by_id(assignment_id).await {
            Ok(Some(assignment)) => assignment,
            Ok(None) => {
                warn!(%assignment_id, "assignment to cancel no longer exists, continuing with substitution");
                return;
            }
            Err(error) => {
                warn!(%assignment_id, %error, "failed to load assignment for cancellation, continuing with substitution");
                return;
            }
        };

        if !existing.status.can_transition(AssignmentStatus::Cancelled) {
            // Already cancelled, most likely by a racing leader.
            return;
        }

        let timestamps = AssignmentTimestamps {
            confirmed_at: existing.confirmed_at,
            declined_at: existing.declined_at,
            cancelled_at: Some(Utc::now()),
        };

        if let Err(error) = self
            .assignment_repository
            .update_status(assignment_id, AssignmentStatus::Cancelled, timestamps)
            .await
        {
            warn!(%assignment_id, %error, "failed to cancel replaced assignment, continuing with substitution");
        }
    }

    /// Resets an invitation to pending, wiping any previous answer.
    ///
    /// Idempotent: resending an already pending assignment leaves the same
    /// end state. Cancelled assignments are terminal and cannot be resent.
    pub async fn resend(&self, assignment_id: AssignmentId) -> AppResult<()> {
        self.transition(assignment_id, AssignmentStatus::Pending)
            .await
    }

    /// Applies a volunteer or leader status change after validating it
    /// against the assignment state machine.
    pub async fn set_status(
        &self,
        assignment_id: AssignmentId,
        status: AssignmentStatus,
    ) -> AppResult<()> {
        self.transition(assignment_id, status).await
    }

    async fn transition(
        &self,
        assignment_id: AssignmentId,
        target: AssignmentStatus,
    ) -> AppResult<()> {
        let assignment = self
            .assignment_repository
            .find_by_id(assignment_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("assignment '{assignment_id}' does not exist"))
            })?;

        if !assignment.status.can_transition(target) {
            return Err(AppError::Validation(format!(
                "assignment cannot move from '{}' to '{}'",
                assignment.status, target
            )));
        }

        let now = Utc::now();
        let timestamps = match target {
            AssignmentStatus::Pending => AssignmentTimestamps::default(),
            AssignmentStatus::Confirmed => AssignmentTimestamps {
                confirmed_at: Some(now),
                ..AssignmentTimestamps::default()
            },
            AssignmentStatus::Declined => AssignmentTimestamps {
                confirmed_at: assignment.confirmed_at,
                declined_at: Some(now),
                cancelled_at: None,
            },
            AssignmentStatus::Cancelled => AssignmentTimestamps {
                confirmed_at: assignment.confirmed_at,
                declined_at: assignment.declined_at,
                cancelled_at: Some(now),
            },
        };

        self.assignment_repository
            .update_status(assignment_id, target, timestamps)
            .await
    }
}
