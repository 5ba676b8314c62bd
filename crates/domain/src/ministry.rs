use serde::{Deserialize, Serialize};
use servir_core::ChurchId;
use uuid::Uuid;

use crate::profile::ProfileId;

/// Unique identifier for a ministry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MinistryId(Uuid);

impl MinistryId {
    /// Creates a new random ministry identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ministry identifier from an existing UUID value.
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

impl Default for MinistryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MinistryId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A team within a church (worship, reception, ...) that volunteers belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ministry {
    /// Unique ministry identifier.
    pub id: MinistryId,
    /// Church the ministry belongs to.
    pub church_id: ChurchId,
    /// Ministry name.
    pub name: String,
    /// Free-form description, if provided.
    pub description: Option<String>,
    /// Profile leading this ministry, if assigned.
    pub leader_profile_id: Option<ProfileId>,
}
