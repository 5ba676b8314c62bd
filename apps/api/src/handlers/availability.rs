//! Personal availability answers.

use std::str::FromStr;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use servir_core::{AppError, UserIdentity};
use servir_domain::AvailabilityStatus;

use crate::auth::identity_profile_id;
use crate::dto::{AvailabilityEntryResponse, SetAvailabilityRequest};
use crate::error::ApiResult;
use crate::state::AppState;

use super::parse_date;

/// GET /api/me/availability - The caller's recorded answers, oldest first.
pub async fn list_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<AvailabilityEntryResponse>>> {
    let profile_id = identity_profile_id(&identity)?;
    let entries = state
        .availability_service
        .list_for_profile(profile_id)
        .await?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// POST /api/me/availability - Record or replace an answer for a date.
pub async fn set_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(payload): Json<SetAvailabilityRequest>,
) -> ApiResult<StatusCode> {
    let profile_id = identity_profile_id(&identity)?;
    let date = parse_date(&payload.date)?;
    let status = AvailabilityStatus::from_str(&payload.status).map_err(|_| {
        AppError::Validation(format!("unknown availability status '{}'", payload.status))
    })?;

    state
        .availability_service
        .set_availability(identity.church_id(), profile_id, date, status)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
