//! Session-based authentication handlers.

use std::str::FromStr;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tower_sessions::Session;

use servir_application::AuthOutcome;
use servir_core::{AppError, UserIdentity};
use servir_domain::{Profile, ProfileId, Role};

use crate::dto::{LeaderLoginRequest, PinLoginRequest, UserIdentityResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// Session key holding the authenticated [`UserIdentity`].
pub const SESSION_USER_KEY: &str = "user";

/// POST /auth/login/pin - Authenticate a volunteer with their PIN.
pub async fn volunteer_login_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<PinLoginRequest>,
) -> ApiResult<Json<UserIdentityResponse>> {
    let outcome = state.account_service.login_volunteer(&payload.pin).await?;
    establish_session(session, outcome, "invalid PIN").await
}

/// POST /auth/login - Authenticate a leader with email and password.
pub async fn leader_login_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LeaderLoginRequest>,
) -> ApiResult<Json<UserIdentityResponse>> {
    let outcome = state
        .account_service
        .login_leader(&payload.email, &payload.password)
        .await?;
    establish_session(session, outcome, "invalid email or password").await
}

async fn establish_session(
    session: Session,
    outcome: AuthOutcome,
    failure_message: &str,
) -> ApiResult<Json<UserIdentityResponse>> {
    let AuthOutcome::Authenticated(profile) = outcome else {
        // Generic error message for all failure cases.
        return Err(AppError::Unauthorized(failure_message.to_owned()).into());
    };

    let identity = identity_for(&profile);

    // OWASP Session Management: regenerate session ID on privilege change.
    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;

    session
        .insert(SESSION_USER_KEY, &identity)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session identity: {error}"))
        })?;

    Ok(Json(UserIdentityResponse::from(identity)))
}

fn identity_for(profile: &Profile) -> UserIdentity {
    UserIdentity::new(
        profile.id.to_string(),
        profile.name.clone(),
        profile.role.as_str(),
        profile.church_id,
    )
}

/// POST /auth/logout - Destroy the session.
pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /auth/me - Return the authenticated identity.
pub async fn me_handler(
    axum::Extension(identity): axum::Extension<UserIdentity>,
) -> ApiResult<Json<UserIdentityResponse>> {
    Ok(Json(UserIdentityResponse::from(identity)))
}

/// Rejects identities whose role cannot manage schedules and people.
pub fn require_leader(identity: &UserIdentity) -> Result<(), AppError> {
    let role = Role::from_str(identity.role())
        .map_err(|_| AppError::Unauthorized("session role is not recognized".to_owned()))?;

    if !role.can_manage() {
        return Err(AppError::Forbidden(
            "this operation requires a leader role".to_owned(),
        ));
    }

    Ok(())
}

/// Resolves the profile id recorded in the session subject.
pub fn identity_profile_id(identity: &UserIdentity) -> Result<ProfileId, AppError> {
    uuid::Uuid::parse_str(identity.subject())
        .map(ProfileId::from_uuid)
        .map_err(|error| AppError::Internal(format!("invalid session subject: {error}")))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use servir_core::ChurchId;
    use servir_domain::{Profile, ProfileId, Role};

    use super::{identity_for, identity_profile_id, require_leader};

    fn profile(role: Role) -> Profile {
        Profile {
            id: ProfileId::new(),
            church_id: ChurchId::new(),
            name: "Ana".to_owned(),
            email: None,
            phone: None,
            avatar_url: None,
            role,
            ministry_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn volunteers_cannot_pass_the_leader_gate() {
        let identity = identity_for(&profile(Role::Volunteer));
        assert!(require_leader(&identity).is_err());

        let identity = identity_for(&profile(Role::Leader));
        assert!(require_leader(&identity).is_ok());
    }

    #[test]
    fn the_session_subject_round_trips_to_a_profile_id() {
        let profile = profile(Role::Volunteer);
        let identity = identity_for(&profile);

        assert_eq!(identity_profile_id(&identity).ok(), Some(profile.id));
    }
}
