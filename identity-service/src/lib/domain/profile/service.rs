use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::principal::models::PrincipalId;
use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::UpdateProfileCommand;
use crate::domain::profile::ports::ProfileRepository;
use crate::domain::profile::ports::ProfileServicePort;

/// Domain service implementation for profile operations.
pub struct ProfileService<PR>
where
    PR: ProfileRepository,
{
    repository: Arc<PR>,
}

impl<PR> ProfileService<PR>
where
    PR: ProfileRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> ProfileServicePort for ProfileService<PR>
where
    PR: ProfileRepository,
{
    async fn get_profile(&self, principal_id: PrincipalId) -> Result<Profile, ProfileError> {
        self.repository
            .find_by_principal(principal_id)
            .await?
            .ok_or(ProfileError::NotFound)
    }

    async fn update_profile(
        &self,
        principal_id: PrincipalId,
        command: UpdateProfileCommand,
    ) -> Result<Profile, ProfileError> {
        let profile = self.repository.upsert(principal_id, command.fields).await?;
        tracing::info!(principal_id = %principal_id, "Profile updated");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::profile::models::ProfileFields;

    mock! {
        pub TestProfileRepository {}

        #[async_trait]
        impl ProfileRepository for TestProfileRepository {
            async fn find_by_principal(&self, principal_id: PrincipalId) -> Result<Option<Profile>, ProfileError>;
            async fn upsert(&self, principal_id: PrincipalId, fields: ProfileFields) -> Result<Profile, ProfileError>;
        }
    }

    #[tokio::test]
    async fn test_get_profile_success() {
        let mut repository = MockTestProfileRepository::new();
        repository
            .expect_find_by_principal()
            .with(eq(PrincipalId(3)))
            .times(1)
            .returning(|id| Ok(Some(Profile::empty(id, Utc::now()))));

        let service = ProfileService::new(Arc::new(repository));
        let profile = service.get_profile(PrincipalId(3)).await.unwrap();

        assert_eq!(profile.principal_id, PrincipalId(3));
    }

    #[tokio::test]
    async fn test_get_profile_not_found() {
        let mut repository = MockTestProfileRepository::new();
        repository
            .expect_find_by_principal()
            .times(1)
            .returning(|_| Ok(None));

        let service = ProfileService::new(Arc::new(repository));
        let result = service.get_profile(PrincipalId(3)).await;

        assert_eq!(result, Err(ProfileError::NotFound));
    }

    #[tokio::test]
    async fn test_update_profile_passes_fields_through() {
        let mut repository = MockTestProfileRepository::new();
        repository
            .expect_upsert()
            .withf(|id, fields| {
                *id == PrincipalId(5) && fields.first_name.as_deref() == Some("Alice")
            })
            .times(1)
            .returning(|id, fields| {
                let mut profile = Profile::empty(id, Utc::now());
                profile.apply(fields, Utc::now());
                Ok(profile)
            });

        let service = ProfileService::new(Arc::new(repository));
        let fields = ProfileFields {
            first_name: Some("Alice".to_string()),
            ..Default::default()
        };
        let profile = service
            .update_profile(PrincipalId(5), UpdateProfileCommand::new(fields))
            .await
            .unwrap();

        assert_eq!(profile.first_name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn test_update_profile_store_failure() {
        let mut repository = MockTestProfileRepository::new();
        repository
            .expect_upsert()
            .times(1)
            .returning(|_, _| Err(ProfileError::StoreUnavailable("connection reset".to_string())));

        let service = ProfileService::new(Arc::new(repository));
        let result = service
            .update_profile(PrincipalId(5), UpdateProfileCommand::new(ProfileFields::default()))
            .await;

        assert!(matches!(result, Err(ProfileError::StoreUnavailable(_))));
    }
}
