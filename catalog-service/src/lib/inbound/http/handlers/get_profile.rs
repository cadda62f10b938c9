use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::create_profile::ProfileData;
use super::ApiSuccess;
use super::ResourceError;
use crate::domain::profile::ports::ProfileServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<ProfileData>, ResourceError> {
    state
        .profile_service
        .get_profile(&id)
        .await
        .map_err(ResourceError::from)
        .map(|profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}
