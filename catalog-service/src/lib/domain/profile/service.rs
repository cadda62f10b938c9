use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileDetails;
use crate::domain::profile::models::ProfileId;
use crate::domain::profile::ports::ProfileRepository;
use crate::domain::profile::ports::ProfileServicePort;

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
    async fn create_profile(&self, details: ProfileDetails) -> Result<Profile, ProfileError> {
        let profile = Profile {
            id: ProfileId::new(),
            details,
            created_at: Utc::now(),
        };

        self.repository.insert(&profile).await?;

        tracing::info!(profile_id = %profile.id, "Profile created");

        Ok(profile)
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, ProfileError> {
        Ok(self.repository.list_newest_first().await?)
    }

    async fn get_profile(&self, id: &str) -> Result<Profile, ProfileError> {
        self.repository
            .find_by_id(&ProfileId::from_string(id))
            .await?
            .ok_or_else(|| ProfileError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::errors::RepositoryError;

    mock! {
        pub TestProfileRepository {}

        #[async_trait]
        impl ProfileRepository for TestProfileRepository {
            async fn insert(&self, profile: &Profile) -> Result<(), RepositoryError>;
            async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, RepositoryError>;
            async fn list_newest_first(&self) -> Result<Vec<Profile>, RepositoryError>;
        }
    }

    #[tokio::test]
    async fn test_create_profile_assigns_identity() {
        let mut repository = MockTestProfileRepository::new();

        repository
            .expect_insert()
            .withf(|profile| profile.details.name.as_deref() == Some("Ada"))
            .times(1)
            .returning(|_| Ok(()));

        let service = ProfileService::new(Arc::new(repository));
        let details = ProfileDetails {
            name: Some("Ada".to_string()),
            interests: vec!["math".to_string()],
            ..Default::default()
        };

        let profile = service.create_profile(details.clone()).await.unwrap();

        assert!(!profile.id.as_str().is_empty());
        assert_eq!(profile.details, details);
    }

    #[tokio::test]
    async fn test_get_profile_not_found() {
        let mut repository = MockTestProfileRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = ProfileService::new(Arc::new(repository));

        assert_eq!(
            service.get_profile("nope").await,
            Err(ProfileError::NotFound("nope".to_string()))
        );
    }

    #[tokio::test]
    async fn test_create_profile_store_failure() {
        let mut repository = MockTestProfileRepository::new();

        repository
            .expect_insert()
            .times(1)
            .returning(|_| Err(RepositoryError::Database("disk full".to_string())));

        let service = ProfileService::new(Arc::new(repository));
        let result = service.create_profile(ProfileDetails::default()).await;

        assert!(matches!(result, Err(ProfileError::Database(_))));
    }
}
