use async_trait::async_trait;

use crate::domain::principal::models::PrincipalId;
use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileFields;
use crate::domain::profile::models::UpdateProfileCommand;

/// Port for profile domain service operations.
#[async_trait]
pub trait ProfileServicePort: Send + Sync + 'static {
    /// Retrieve the profile of an authenticated principal.
    ///
    /// # Errors
    /// * `NotFound` - No profile stored for this principal
    /// * `StoreUnavailable` - Database operation failed
    async fn get_profile(&self, principal_id: PrincipalId) -> Result<Profile, ProfileError>;

    /// Create or partially update the profile of an authenticated principal.
    ///
    /// # Arguments
    /// * `principal_id` - Principal taken from the verified token
    /// * `command` - Validated fields; absent fields keep their stored value
    ///
    /// # Returns
    /// Profile as stored after the update
    ///
    /// # Errors
    /// * `NotFound` - Principal does not exist
    /// * `StoreUnavailable` - Database operation failed
    async fn update_profile(
        &self,
        principal_id: PrincipalId,
        command: UpdateProfileCommand,
    ) -> Result<Profile, ProfileError>;
}

/// Persistence operations for profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync + 'static {
    /// # Returns
    /// Optional profile (None if not found)
    ///
    /// # Errors
    /// * `StoreUnavailable` - Database operation failed
    async fn find_by_principal(
        &self,
        principal_id: PrincipalId,
    ) -> Result<Option<Profile>, ProfileError>;

    /// Insert the profile if missing, otherwise overwrite the supplied fields.
    ///
    /// # Errors
    /// * `NotFound` - Principal does not exist
    /// * `StoreUnavailable` - Database operation failed
    async fn upsert(
        &self,
        principal_id: PrincipalId,
        fields: ProfileFields,
    ) -> Result<Profile, ProfileError>;
}
