use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileDetails;
use crate::domain::profile::models::ProfileId;

/// Port for profile operations.
#[async_trait]
pub trait ProfileServicePort: Send + Sync + 'static {
    /// Create a profile, assigning its ID and creation time.
    async fn create_profile(&self, details: ProfileDetails) -> Result<Profile, ProfileError>;

    /// List profiles, newest first.
    async fn list_profiles(&self) -> Result<Vec<Profile>, ProfileError>;

    /// Fetch one profile.
    ///
    /// # Errors
    /// * `NotFound` - No profile with this ID
    /// * `Database` - Store operation failed
    async fn get_profile(&self, id: &str) -> Result<Profile, ProfileError>;
}

/// Persistence operations for the profile collection.
#[async_trait]
pub trait ProfileRepository: Send + Sync + 'static {
    async fn insert(&self, profile: &Profile) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, RepositoryError>;

    /// Full scan ordered by creation time, newest first.
    async fn list_newest_first(&self) -> Result<Vec<Profile>, RepositoryError>;
}
