//! Volunteer and member management.

use std::str::FromStr;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use servir_application::{CreateVolunteerInput, ProfileUpdate};
use servir_core::{AppError, UserIdentity};
use servir_domain::{MinistryId, ProfileId, Role};

use crate::auth::require_leader;
use crate::dto::{
    CreateLeaderRequest, CreateVolunteerRequest, PinResetResponse, ProfileResponse,
    UpdateProfileRequest, VolunteerCreatedResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

use super::parse_uuid;

/// GET /api/volunteers - The church's volunteers, ordered by name.
pub async fn list_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<ProfileResponse>>> {
    require_leader(&identity)?;

    let volunteers = state
        .account_service
        .list_volunteers(identity.church_id())
        .await?;

    Ok(Json(volunteers.into_iter().map(Into::into).collect()))
}

/// GET /api/members - Every member of the church, any role.
pub async fn list_members_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<ProfileResponse>>> {
    require_leader(&identity)?;

    let members = state
        .account_service
        .list_members(identity.church_id())
        .await?;

    Ok(Json(members.into_iter().map(Into::into).collect()))
}

/// POST /api/volunteers - Create a volunteer. The response carries the
/// plaintext PIN; it is never retrievable again.
pub async fn create_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(payload): Json<CreateVolunteerRequest>,
) -> ApiResult<(StatusCode, Json<VolunteerCreatedResponse>)> {
    require_leader(&identity)?;

    let credentials = state
        .account_service
        .create_volunteer(CreateVolunteerInput {
            church_id: identity.church_id(),
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            ministry_ids: parse_ministry_ids(&payload.ministry_ids)?,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(VolunteerCreatedResponse {
            profile: credentials.profile.into(),
            pin: credentials.pin,
        }),
    ))
}

/// POST /api/leaders - Create a leader account with password login.
pub async fn create_leader_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(payload): Json<CreateLeaderRequest>,
) -> ApiResult<(StatusCode, Json<ProfileResponse>)> {
    require_leader(&identity)?;

    let profile = state
        .account_service
        .create_leader(
            identity.church_id(),
            payload.name,
            payload.email,
            &payload.password,
            parse_ministry_ids(&payload.ministry_ids)?,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(profile.into())))
}

/// PUT /api/volunteers/{id} - Update a member profile.
pub async fn update_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(profile_id): Path<String>,
    Json(payload): Json<UpdateProfileRequest>,
) -> ApiResult<StatusCode> {
    require_leader(&identity)?;

    let profile_id = ProfileId::from_uuid(parse_uuid(&profile_id, "profile")?);
    let role = Role::from_str(&payload.role)
        .map_err(|_| AppError::Validation(format!("unknown role '{}'", payload.role)))?;

    state
        .account_service
        .update_profile(
            profile_id,
            ProfileUpdate {
                name: payload.name,
                email: payload.email,
                phone: payload.phone,
                ministry_ids: parse_ministry_ids(&payload.ministry_ids)?,
                role,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/volunteers/{id}/reset-pin - Issue a fresh PIN. The old PIN
/// stops working immediately.
pub async fn reset_pin_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(profile_id): Path<String>,
) -> ApiResult<Json<PinResetResponse>> {
    require_leader(&identity)?;

    let profile_id = ProfileId::from_uuid(parse_uuid(&profile_id, "profile")?);
    let pin = state.account_service.reset_pin(profile_id).await?;

    Ok(Json(PinResetResponse { pin }))
}

fn parse_ministry_ids(raw: &[String]) -> Result<Vec<MinistryId>, AppError> {
    raw.iter()
        .map(|value| parse_uuid(value, "ministry").map(MinistryId::from_uuid))
        .collect()
}
