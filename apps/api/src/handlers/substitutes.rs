//! Substitute suggestion and application.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use servir_core::UserIdentity;
use servir_domain::{AssignmentId, MinistryId, ProfileId, ScheduleId};

use crate::auth::require_leader;
use crate::dto::{
    AssignSubstituteRequest, AssignmentResponse, SuggestSubstitutesRequest, SuggestionResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

use super::parse_uuid;

/// POST /api/schedules/{id}/substitutes/suggest - Rank substitute candidates
/// for a vacated slot.
pub async fn suggest_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(schedule_id): Path<String>,
    Json(payload): Json<SuggestSubstitutesRequest>,
) -> ApiResult<Json<SuggestionResponse>> {
    require_leader(&identity)?;

    let schedule_id = ScheduleId::from_uuid(parse_uuid(&schedule_id, "schedule")?);
    let ministry_id = MinistryId::from_uuid(parse_uuid(&payload.ministry_id, "ministry")?);

    let suggestion = state
        .substitution_service
        .suggest_substitutes(schedule_id, ministry_id)
        .await?;

    Ok(Json(suggestion.into()))
}

/// POST /api/schedules/{id}/substitutes - Put a substitute on the slot,
/// cancelling the replaced assignment when one is named.
pub async fn assign_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(schedule_id): Path<String>,
    Json(payload): Json<AssignSubstituteRequest>,
) -> ApiResult<(StatusCode, Json<AssignmentResponse>)> {
    require_leader(&identity)?;

    let schedule_id = ScheduleId::from_uuid(parse_uuid(&schedule_id, "schedule")?);
    let profile_id = ProfileId::from_uuid(parse_uuid(&payload.profile_id, "profile")?);
    let old_assignment_id = payload
        .old_assignment_id
        .as_deref()
        .map(|raw| parse_uuid(raw, "assignment").map(AssignmentId::from_uuid))
        .transpose()?;

    let assignment = state
        .substitution_service
        .assign_substitute(schedule_id, profile_id, old_assignment_id)
        .await?;

    Ok((StatusCode::CREATED, Json(assignment.into())))
}
