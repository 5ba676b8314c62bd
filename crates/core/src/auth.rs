use serde::{Deserialize, Serialize};

use crate::ChurchId;

/// User information persisted in the authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    subject: String,
    display_name: String,
    role: String,
    church_id: ChurchId,
}

impl UserIdentity {
    /// Creates a user identity from authentication data.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        display_name: impl Into<String>,
        role: impl Into<String>,
        church_id: ChurchId,
    ) -> Self {
        Self {
            subject: subject.into(),
            display_name: display_name.into(),
            role: role.into(),
            church_id,
        }
    }

    /// Returns the stable subject identifier (profile id).
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the display name shown in the UI.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the role name recorded at login time.
    #[must_use]
    pub fn role(&self) -> &str {
        self.role.as_str()
    }

    /// Returns the church the user belongs to.
    #[must_use]
    pub fn church_id(&self) -> ChurchId {
        self.church_id
    }
}

#[cfg(test)]
mod tests {
    use super::UserIdentity;
    use crate::ChurchId;

    #[test]
    fn identity_exposes_login_fields() {
        let church_id = ChurchId::new();
        let identity = UserIdentity::new("subject-1", "Ana", "leader", church_id);

        assert_eq!(identity.subject(), "subject-1");
        assert_eq!(identity.display_name(), "Ana");
        assert_eq!(identity.role(), "leader");
        assert_eq!(identity.church_id(), church_id);
    }
}
