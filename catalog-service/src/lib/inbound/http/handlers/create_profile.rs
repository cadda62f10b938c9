use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiSuccess;
use super::ResourceError;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileDetails;
use crate::domain::profile::ports::ProfileServicePort;
use crate::inbound::http::router::AppState;

const CREATE_FAILED: &str = "Failed to create profile";

/// HTTP request body for creating a profile.
///
/// Every field is optional; unknown keys reject the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateProfileRequest {
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
}

impl From<CreateProfileRequest> for ProfileDetails {
    fn from(request: CreateProfileRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            phone: request.phone,
            degree: request.degree,
            institution: request.institution,
            year: request.year,
            interests: request.interests,
            achievements: request.achievements,
        }
    }
}

/// Profile representation returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub year: Option<String>,
    pub interests: Vec<String>,
    pub achievements: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Profile> for ProfileData {
    fn from(profile: Profile) -> Self {
        let details = profile.details;
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

pub async fn create_profile(
    State(state): State<AppState>,
    body: Result<Json<CreateProfileRequest>, JsonRejection>,
) -> Result<ApiSuccess<ProfileData>, ResourceError> {
    let Json(request) = body.map_err(|e| {
        tracing::debug!(error = %e.body_text(), "Rejected profile payload");
        ResourceError::bad_request(CREATE_FAILED)
    })?;

    let profile = state
        .profile_service
        .create_profile(request.into())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Profile creation failed");
            ResourceError::bad_request(CREATE_FAILED)
        })?;

    Ok(ApiSuccess::new(StatusCode::CREATED, profile.into()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_accepts_camel_case_subset() {
        let request: CreateProfileRequest =
            serde_json::from_value(json!({"name": "Ada", "interests": ["math"]})).unwrap();

        let details = ProfileDetails::from(request);

        assert_eq!(details.name.as_deref(), Some("Ada"));
        assert_eq!(details.interests, vec!["math".to_string()]);
        assert!(details.achievements.is_empty());
    }

    #[test]
    fn test_request_rejects_unknown_field() {
        let result = serde_json::from_value::<CreateProfileRequest>(json!({"nickname": "A"}));

        assert!(result.is_err());
    }
}
