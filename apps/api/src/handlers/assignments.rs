//! Assignment status transitions and personal assignment reads.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use servir_core::{AppError, UserIdentity};
use servir_domain::{AssignmentId, AssignmentStatus};

use crate::auth::{identity_profile_id, require_leader};
use crate::dto::AssignmentResponse;
use crate::error::ApiResult;
use crate::state::AppState;

use super::parse_uuid;

/// GET /api/me/assignments - The caller's own assignments, oldest first.
pub async fn my_assignments_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<AssignmentResponse>>> {
    let profile_id = identity_profile_id(&identity)?;
    let assignments = state
        .schedule_service
        .assignments_for_profile(profile_id)
        .await?;

    Ok(Json(assignments.into_iter().map(Into::into).collect()))
}

/// POST /api/assignments/{id}/confirm - Accept an invitation.
pub async fn confirm_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(assignment_id): Path<String>,
) -> ApiResult<StatusCode> {
    answer(state, identity, &assignment_id, AssignmentStatus::Confirmed).await
}

/// POST /api/assignments/{id}/decline - Decline an invitation.
pub async fn decline_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(assignment_id): Path<String>,
) -> ApiResult<StatusCode> {
    answer(state, identity, &assignment_id, AssignmentStatus::Declined).await
}

/// Confirm and decline are volunteer actions on the volunteer's own
/// assignment; a leader may also answer on someone's behalf.
async fn answer(
    state: AppState,
    identity: UserIdentity,
    assignment_id: &str,
    status: AssignmentStatus,
) -> ApiResult<StatusCode> {
    let assignment_id = AssignmentId::from_uuid(parse_uuid(assignment_id, "assignment")?);

    if require_leader(&identity).is_err() {
        let assignment = state
            .substitution_service
            .find_assignment(assignment_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("assignment '{assignment_id}' does not exist"))
            })?;

        if assignment.profile_id != identity_profile_id(&identity)? {
            return Err(
                AppError::Forbidden("this assignment belongs to someone else".to_owned()).into(),
            );
        }
    }

    state
        .substitution_service
        .set_status(assignment_id, status)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/assignments/{id}/resend - Reset an invitation to pending.
pub async fn resend_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(assignment_id): Path<String>,
) -> ApiResult<StatusCode> {
    require_leader(&identity)?;

    let assignment_id = AssignmentId::from_uuid(parse_uuid(&assignment_id, "assignment")?);
    state.substitution_service.resend(assignment_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/assignments/{id}/cancel - Cancel an assignment outright.
pub async fn cancel_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(assignment_id): Path<String>,
) -> ApiResult<StatusCode> {
    require_leader(&identity)?;

    let assignment_id = AssignmentId::from_uuid(parse_uuid(&assignment_id, "assignment")?);
    state
        .substitution_service
        .set_status(assignment_id, AssignmentStatus::Cancelled)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
