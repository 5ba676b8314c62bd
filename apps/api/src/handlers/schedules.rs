//! Schedule, service time, and dashboard handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use servir_core::UserIdentity;
use servir_domain::{MinistryId, ProfileId, ScheduleId, ServiceTimeId};

use crate::auth::{identity_profile_id, require_leader};
use crate::dto::{
    AssignmentCountsResponse, AssignmentResponse, CreateScheduleRequest, CreateServiceTimeRequest,
    ScheduleResponse, ServiceTimeResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

use super::{parse_date, parse_uuid};

/// GET /api/schedules - List schedules with their assignments, soonest first.
pub async fn list_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<ScheduleResponse>>> {
    let overviews = state
        .schedule_service
        .list_schedules(identity.church_id())
        .await?;

    Ok(Json(
        overviews
            .into_iter()
            .map(|overview| ScheduleResponse::from_parts(overview.schedule, overview.assignments))
            .collect(),
    ))
}

/// POST /api/schedules - Create a schedule and invite its volunteers.
pub async fn create_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(payload): Json<CreateScheduleRequest>,
) -> ApiResult<(StatusCode, Json<ScheduleResponse>)> {
    require_leader(&identity)?;

    let volunteer_ids = payload
        .volunteer_ids
        .iter()
        .map(|raw| parse_uuid(raw, "profile").map(ProfileId::from_uuid))
        .collect::<Result<Vec<_>, _>>()?;

    let schedule = state
        .schedule_service
        .create_schedule(servir_application::CreateScheduleInput {
            church_id: identity.church_id(),
            ministry_id: MinistryId::from_uuid(parse_uuid(&payload.ministry_id, "ministry")?),
            date: parse_date(&payload.date)?,
            service_time_id: ServiceTimeId::from_uuid(parse_uuid(
                &payload.service_time_id,
                "service time",
            )?),
            volunteer_ids,
            created_by: identity_profile_id(&identity)?,
        })
        .await?;

    let schedule_id = schedule.id;
    let assignments = state
        .schedule_service
        .assignments_for_schedule(schedule_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ScheduleResponse::from_parts(schedule, assignments)),
    ))
}

/// GET /api/schedules/{id}/assignments - Assignments on one schedule.
pub async fn assignments_handler(
    State(state): State<AppState>,
    Path(schedule_id): Path<String>,
) -> ApiResult<Json<Vec<AssignmentResponse>>> {
    let schedule_id = ScheduleId::from_uuid(parse_uuid(&schedule_id, "schedule")?);
    let assignments = state
        .schedule_service
        .assignments_for_schedule(schedule_id)
        .await?;

    Ok(Json(assignments.into_iter().map(Into::into).collect()))
}

/// GET /api/service-times - List the church's recurring service slots.
pub async fn list_service_times_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<ServiceTimeResponse>>> {
    let service_times = state
        .schedule_service
        .list_service_times(identity.church_id())
        .await?;

    Ok(Json(service_times.into_iter().map(Into::into).collect()))
}

/// POST /api/service-times - Create a recurring service slot.
pub async fn create_service_time_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(payload): Json<CreateServiceTimeRequest>,
) -> ApiResult<(StatusCode, Json<ServiceTimeResponse>)> {
    require_leader(&identity)?;

    let service_time = state
        .schedule_service
        .create_service_time(
            identity.church_id(),
            payload.day_of_week,
            payload.time,
            payload.name,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(service_time.into())))
}

/// GET /api/dashboard/counts - Assignment totals for the leader dashboard.
pub async fn counts_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<Json<AssignmentCountsResponse>> {
    require_leader(&identity)?;

    let counts = state
        .schedule_service
        .assignment_counts(identity.church_id())
        .await?;

    Ok(Json(counts.into()))
}
