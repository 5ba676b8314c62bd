//! Ministry management and roster views.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;

use servir_core::UserIdentity;
use servir_domain::{MinistryId, ProfileId};

use crate::auth::require_leader;
use crate::dto::{CandidateResponse, MinistryResponse, SaveMinistryRequest};
use crate::error::ApiResult;
use crate::state::AppState;

use super::{parse_date, parse_uuid};

/// GET /api/ministries - List the church's ministries.
pub async fn list_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<MinistryResponse>>> {
    let ministries = state
        .ministry_service
        .list_ministries(identity.church_id())
        .await?;

    Ok(Json(ministries.into_iter().map(Into::into).collect()))
}

/// POST /api/ministries - Create a ministry.
pub async fn create_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(payload): Json<SaveMinistryRequest>,
) -> ApiResult<(StatusCode, Json<MinistryResponse>)> {
    require_leader(&identity)?;

    let leader_profile_id = parse_leader_id(payload.leader_profile_id.as_deref())?;
    let ministry = state
        .ministry_service
        .create_ministry(
            identity.church_id(),
            payload.name,
            payload.description,
            leader_profile_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ministry.into())))
}

/// PUT /api/ministries/{id} - Update a ministry.
pub async fn update_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(ministry_id): Path<String>,
    Json(payload): Json<SaveMinistryRequest>,
) -> ApiResult<Json<MinistryResponse>> {
    require_leader(&identity)?;

    let ministry_id = MinistryId::from_uuid(parse_uuid(&ministry_id, "ministry")?);
    let leader_profile_id = parse_leader_id(payload.leader_profile_id.as_deref())?;
    let ministry = state
        .ministry_service
        .update_ministry(
            ministry_id,
            payload.name,
            payload.description,
            leader_profile_id,
        )
        .await?;

    Ok(Json(ministry.into()))
}

/// DELETE /api/ministries/{id} - Delete a ministry.
pub async fn delete_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(ministry_id): Path<String>,
) -> ApiResult<StatusCode> {
    require_leader(&identity)?;

    let ministry_id = MinistryId::from_uuid(parse_uuid(&ministry_id, "ministry")?);
    state.ministry_service.delete_ministry(ministry_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct RosterQuery {
    date: String,
}

/// GET /api/ministries/{id}/roster?date=YYYY-MM-DD - Members annotated with
/// availability and assignment load for a date. Annotates, never filters.
pub async fn roster_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(ministry_id): Path<String>,
    Query(query): Query<RosterQuery>,
) -> ApiResult<Json<Vec<CandidateResponse>>> {
    require_leader(&identity)?;

    let ministry_id = MinistryId::from_uuid(parse_uuid(&ministry_id, "ministry")?);
    let date = parse_date(&query.date)?;
    let roster = state
        .schedule_service
        .ministry_roster(ministry_id, date)
        .await?;

    Ok(Json(roster.into_iter().map(Into::into).collect()))
}

fn parse_leader_id(raw: Option<&str>) -> Result<Option<ProfileId>, servir_core::AppError> {
    raw.map(|value| parse_uuid(value, "profile").map(ProfileId::from_uuid))
        .transpose()
}
