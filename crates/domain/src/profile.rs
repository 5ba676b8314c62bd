//! Profile domain types and validation rules.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use servir_core::{AppError, AppResult, ChurchId};
use uuid::Uuid;

use crate::ministry::MinistryId;

/// Unique identifier for a profile record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProfileId(Uuid);

impl ProfileId {
    /// Creates a new random profile identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a profile identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Role a profile holds within its church.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Serves on schedules; logs in with a PIN.
    Volunteer,
    /// Manages ministries, schedules, and volunteers.
    Leader,
    /// Church-wide administration.
    Admin,
    /// Cross-church administration.
    SuperAdmin,
}

impl Role {
    /// Returns the canonical storage string for the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Volunteer => "volunteer",
            Self::Leader => "leader",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Whether the role may manage schedules and volunteers.
    #[must_use]
    pub fn can_manage(&self) -> bool {
        matches!(self, Self::Leader | Self::Admin | Self::SuperAdmin)
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "volunteer" => Ok(Self::Volunteer),
            "leader" => Ok(Self::Leader),
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            other => Err(AppError::Validation(format!("unknown role '{other}'"))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A church member who can be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique profile identifier.
    pub id: ProfileId,
    /// Church the profile belongs to.
    pub church_id: ChurchId,
    /// Display name.
    pub name: String,
    /// Contact email, if provided.
    pub email: Option<String>,
    /// Contact phone, if provided.
    pub phone: Option<String>,
    /// Avatar image URL, if provided.
    pub avatar_url: Option<String>,
    /// Role within the church.
    pub role: Role,
    /// Ministries the profile serves in. Order irrelevant, duplicates meaningless.
    pub ministry_ids: Vec<MinistryId>,
    /// Record creation time.
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Profile {
    /// Whether the profile is a member of the given ministry.
    #[must_use]
    pub fn serves_in(&self, ministry_id: MinistryId) -> bool {
        self.ministry_ids.contains(&ministry_id)
    }
}

/// Required length of a volunteer login PIN.
pub const PIN_LENGTH: usize = 4;

/// Validates a plaintext volunteer PIN: exactly four ASCII digits.
pub fn validate_pin(pin: &str) -> AppResult<()> {
    if pin.len() != PIN_LENGTH || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(format!(
            "PIN must be exactly {PIN_LENGTH} digits"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Role, validate_pin};
    use std::str::FromStr;

    #[test]
    fn pin_accepts_four_digits() {
        assert!(validate_pin("0412").is_ok());
    }

    #[test]
    fn pin_rejects_short_input() {
        assert!(validate_pin("123").is_err());
    }

    #[test]
    fn pin_rejects_non_digits() {
        assert!(validate_pin("12a4").is_err());
        assert!(validate_pin("12345").is_err());
        assert!(validate_pin("").is_err());
    }

    #[test]
    fn role_round_trips_through_storage_string() {
        for role in [Role::Volunteer, Role::Leader, Role::Admin, Role::SuperAdmin] {
            assert_eq!(Role::from_str(role.as_str()).ok(), Some(role));
        }
    }

    #[test]
    fn role_rejects_unknown_string() {
        assert!(Role::from_str("pastor").is_err());
    }

    #[test]
    fn management_roles_exclude_volunteers() {
        assert!(!Role::Volunteer.can_manage());
        assert!(Role::Leader.can_manage());
    }
}
