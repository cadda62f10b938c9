use axum::extract::State;
use axum::http::StatusCode;

use super::create_profile::ProfileData;
use super::ApiSuccess;
use super::ResourceError;
use crate::domain::profile::ports::ProfileServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_profiles(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ProfileData>>, ResourceError> {
    let profiles = state.profile_service.list_profiles().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        profiles.into_iter().map(ProfileData::from).collect(),
    ))
}
