use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

/// HTTP request body for registering an account.
///
/// Missing fields deserialize as empty strings and fail validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub message: String,
}

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let Json(body) = body
        .map_err(|e| ApiError::BadRequest(format!("Registration failed: {}", e.body_text())))?;

    let command = RegisterAccountCommand::parse(&body.username, body.password, &body.role)?;

    state.account_service.register(command).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        RegisterResponseData {
            message: "Registration successful. You can now login.".to_string(),
        },
    ))
}
