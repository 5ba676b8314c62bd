use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use servir_core::AppError;

use crate::profile::ProfileId;

/// A volunteer's self-reported status for one calendar date.
///
/// The absence of a stored record is equivalent to [`Self::Uninformed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    /// Volunteer said they can serve that day.
    Available,
    /// Volunteer said they cannot serve that day.
    Unavailable,
    /// Volunteer has not said either way.
    Uninformed,
}

impl AvailabilityStatus {
    /// Returns the canonical storage string for the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
            Self::Uninformed => "uninformed",
        }
    }
}

impl Default for AvailabilityStatus {
    fn default() -> Self {
        Self::Uninformed
    }
}

impl FromStr for AvailabilityStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "available" => Ok(Self::Available),
            "unavailable" => Ok(Self::Unavailable),
            "uninformed" => Ok(Self::Uninformed),
            other => Err(AppError::Validation(format!(
                "unknown availability status '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// One (profile, date) availability record. Upsert semantics: one per pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityEntry {
    /// Profile the entry belongs to.
    pub profile_id: ProfileId,
    /// Calendar date the entry covers.
    pub date: NaiveDate,
    /// Self-reported status for the date.
    pub status: AvailabilityStatus,
}

#[cfg(test)]
mod tests {
    use super::AvailabilityStatus;
    use std::str::FromStr;

    #[test]
    fn absent_record_defaults_to_uninformed() {
        assert_eq!(AvailabilityStatus::default(), AvailabilityStatus::Uninformed);
    }

    #[test]
    fn status_round_trips_through_storage_string() {
        for status in [
            AvailabilityStatus::Available,
            AvailabilityStatus::Unavailable,
            AvailabilityStatus::Uninformed,
        ] {
            assert_eq!(AvailabilityStatus::from_str(status.as_str()).ok(), Some(status));
        }
    }
}
