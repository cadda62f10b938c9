use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::domain::errors::RepositoryError;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileDetails;
use crate::domain::profile::models::ProfileId;
use crate::domain::profile::ports::ProfileRepository;
use crate::outbound::store::Collection;
use crate::outbound::store::PostgresDocumentStore;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct ProfileDocument {
    id: String,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    degree: Option<String>,
    institution: Option<String>,
    year: Option<String>,
    #[serde(default)]
    interests: Vec<String>,
    #[serde(default)]
    achievements: Vec<String>,
    created_at: DateTime<Utc>,
}

impl From<&Profile> for ProfileDocument {
    fn from(profile: &Profile) -> Self {
        let details = profile.details.clone();
        Self {
            id: profile.id.to_string(),
            name: details.name,
            email: details.email,
            phone: details.phone,
            degree: details.degree,
            institution: details.institution,
            year: details.year,
            interests: details.interests,
            achievements: details.achievements,
            created_at: profile.created_at,
        }
    }
}

impl From<ProfileDocument> for Profile {
    fn from(document: ProfileDocument) -> Self {
        Self {
            id: ProfileId::from_string(document.id),
            details: ProfileDetails {
                name: document.name,
                email: document.email,
                phone: document.phone,
                degree: document.degree,
                institution: document.institution,
                year: document.year,
                interests: document.interests,
                achievements: document.achievements,
            },
            created_at: document.created_at,
        }
    }
}

fn decode(document: Value) -> Result<Profile, RepositoryError> {
    serde_json::from_value::<ProfileDocument>(document)
        .map(Profile::from)
        .map_err(|e| RepositoryError::Corrupt(e.to_string()))
}

pub struct PostgresProfileRepository {
    store: PostgresDocumentStore,
}

impl PostgresProfileRepository {
    pub fn new(store: PostgresDocumentStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn insert(&self, profile: &Profile) -> Result<(), RepositoryError> {
        let document = serde_json::to_value(ProfileDocument::from(profile))
            .map_err(|e| RepositoryError::Corrupt(e.to_string()))?;

        self.store
            .insert(Collection::Profiles, profile.id.as_str(), &document)
            .await
    }

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, RepositoryError> {
        self.store
            .find_by_id(Collection::Profiles, id.as_str())
            .await?
            .map(decode)
            .transpose()
    }

    async fn list_newest_first(&self) -> Result<Vec<Profile>, RepositoryError> {
        let mut profiles = self
            .store
            .scan(Collection::Profiles)
            .await?
            .into_iter()
            .map(decode)
            .collect::<Result<Vec<_>, _>>()?;

        profiles.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(profiles)
    }
}
