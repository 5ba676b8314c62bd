//! Account management and authentication for volunteers and leaders.
//!
//! Volunteers log in with a four digit PIN; leaders log in with email and
//! password. Login failures are generic so neither path reveals whether an
//! account exists.

use std::sync::Arc;

use servir_core::{AppError, AppResult, ChurchId};
use servir_domain::{Profile, ProfileId, Role, validate_pin};

use crate::ports::{NewProfile, ProfileRepository, ProfileUpdate};

mod pin_crypto;


/// Minimum accepted leader password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Port for password hashing operations. Keeps the application layer free
/// of direct cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password using Argon2id.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    /// Must run in constant time regardless of validity.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

/// Result of a login attempt.
#[derive(Debug)]
pub enum AuthOutcome {
    /// Authentication succeeded. Session can be established.
    Authenticated(Profile),
    /// Authentication failed. Generic message prevents enumeration.
    Failed,
}

/// Parameters for creating a volunteer account.
#[derive(Debug, Clone)]
pub struct CreateVolunteerInput {
    /// Church the volunteer belongs to.
    pub church_id: ChurchId,
    /// Display name.
    pub name: String,
    /// Contact email, if known.
    pub email: Option<String>,
    /// Contact phone, if known.
    pub phone: Option<String>,
    /// Ministries the volunteer serves in.
    pub ministry_ids: Vec<servir_domain::MinistryId>,
}

/// A freshly created volunteer together with the plaintext PIN.
///
/// The PIN is returned exactly once; only its hash is stored.
#[derive(Debug, Clone)]
pub struct VolunteerCredentials {
    /// The created profile.
    pub profile: Profile,
    /// The generated four digit PIN.
    pub pin: String,
}

/// Application service for accounts and authentication.
#[derive(Clone)]
pub struct AccountService {
    profile_repository: Arc<dyn ProfileRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl AccountService {
    /// Creates a new account service.
    #[must_use]
    pub fn new(
        profile_repository: Arc<dyn ProfileRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            profile_repository,
            password_hasher,
        }
    }

    /// Authenticates a volunteer by PIN.
    ///
    /// A malformed PIN is a validation error; a well-formed PIN that matches
    /// no volunteer fails generically.
    pub async fn login_volunteer(&self, pin: &str) -> AppResult<AuthOutcome> {
        validate_pin(pin)?;

        let pin_hash = pin_crypto::hash_pin(pin);
        match self
            .profile_repository
            .find_volunteer_by_pin_hash(&pin_hash)
            .await?
        {
            Some(profile) => Ok(AuthOutcome::Authenticated(profile)),
            None => Ok(AuthOutcome::Failed),
        }
    }

    /// Authenticates a leader with email and password.
    ///
    /// Returns `AuthOutcome::Failed` for any failure (unknown email, no
    /// password on the account, wrong password, non-leader role) to prevent
    /// enumeration.
    pub async fn login_leader(&self, email: &str, password: &str) -> AppResult<AuthOutcome> {
        let account = self.profile_repository.find_account_by_email(email).await?;

        let Some(account) = account else {
            // Always hash to keep the unknown-email path timing neutral.
            let _ = self.password_hasher.hash_password(password);
            return Ok(AuthOutcome::Failed);
        };

        let Some(ref stored_hash) = account.password_hash else {
            // PIN-only profile trying password login.
            let _ = self.password_hasher.hash_password(password);
            return Ok(AuthOutcome::Failed);
        };

        if !self.password_hasher.verify_password(password, stored_hash)? {
            return Ok(AuthOutcome::Failed);
        }

        if !account.profile.role.can_manage() {
            return Ok(AuthOutcome::Failed);
        }

        Ok(AuthOutcome::Authenticated(account.profile))
    }

    /// Creates a volunteer with a generated PIN.
    ///
    /// The plaintext PIN appears only in the returned credentials.
    pub async fn create_volunteer(
        &self,
        input: CreateVolunteerInput,
    ) -> AppResult<VolunteerCredentials> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".to_owned()));
        }

        let pin = pin_crypto::generate_pin();
        let profile = self
            .profile_repository
            .create(NewProfile {
                church_id: input.church_id,
                name: input.name,
                email: input.email,
                phone: input.phone,
                role: Role::Volunteer,
                ministry_ids: input.ministry_ids,
                pin_hash: Some(pin_crypto::hash_pin(&pin)),
                password_hash: None,
            })
            .await?;

        Ok(VolunteerCredentials { profile, pin })
    }

    /// Creates a leader account with email and password login.
    pub async fn create_leader(
        &self,
        church_id: ChurchId,
        name: String,
        email: String,
        password: &str,
        ministry_ids: Vec<servir_domain::MinistryId>,
    ) -> AppResult<Profile> {
        if name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".to_owned()));
        }
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AppError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        let password_hash = self.password_hasher.hash_password(password)?;
        self.profile_repository
            .create(NewProfile {
                church_id,
                name,
                email: Some(email),
                phone: None,
                role: Role::Leader,
                ministry_ids,
                pin_hash: None,
                password_hash: Some(password_hash),
            })
            .await
    }

    /// Updates a profile's editable fields.
    pub async fn update_profile(
        &self,
        profile_id: ProfileId,
        changes: ProfileUpdate,
    ) -> AppResult<()> {
        if changes.name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".to_owned()));
        }
        self.profile_repository.update(profile_id, changes).await
    }

    /// Replaces a volunteer's PIN with a freshly generated one.
    ///
    /// Returns the new plaintext PIN exactly once.
    pub async fn reset_pin(&self, profile_id: ProfileId) -> AppResult<String> {
        let profile = self
            .profile_repository
            .find_by_id(profile_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("profile '{profile_id}' does not exist")))?;

        if profile.role != Role::Volunteer {
            return Err(AppError::Validation(
                "only volunteers log in with a PIN".to_owned(),
            ));
        }

        let pin = pin_crypto::generate_pin();
        self.profile_repository
            .update_pin_hash(profile_id, &pin_crypto::hash_pin(&pin))
            .await?;
        Ok(pin)
    }

    /// Lists a church's volunteers, ordered by name.
    pub async fn list_volunteers(&self, church_id: ChurchId) -> AppResult<Vec<Profile>> {
        let profiles = self.profile_repository.list_by_church(church_id).await?;
        Ok(profiles
            .into_iter()
            .filter(|profile| profile.role == Role::Volunteer)
            .collect())
    }

    /// Lists every profile in a church, ordered by name.
    pub async fn list_members(&self, church_id: ChurchId) -> AppResult<Vec<Profile>> {
        self.profile_repository.list_by_church(church_id).await
    }
}
