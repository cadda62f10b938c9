use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::domain::account::errors::LoginError;
use crate::domain::account::errors::RegistrationError;
use crate::domain::product::errors::ProductError;
use crate::domain::profile::errors::ProfileError;

pub mod create_profile;
pub mod delete_product;
pub mod get_profile;
pub mod health;
pub mod list_products;
pub mod list_profiles;
pub mod login;
pub mod register;
pub mod search_products;
pub mod update_product;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Error rendered as `{"message": ...}`.
///
/// Used by the auth routes, the auth guard and the fallback route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
}

impl ApiError {
    fn into_parts(self) -> (StatusCode, String) {
        match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.into_parts();

        (status, Json(ApiErrorData { message })).into_response()
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Database(_) | RegistrationError::PasswordHashing(_) => {
                tracing::error!(error = %err, "Registration failed");
                ApiError::InternalServerError("Server error".to_string())
            }
            _ => ApiError::BadRequest(format!("Registration failed: {}", err)),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::AuthFailed => ApiError::Unauthorized(err.to_string()),
            LoginError::TokenIssuance(_) | LoginError::Database(_) => {
                tracing::error!(error = %err, "Login failed");
                ApiError::InternalServerError("Server error".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Error on the product and profile routes, rendered as `{"error": ...}`.
///
/// `details` is only set for an exhausted product update and lists the cause
/// of every strategy tried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<String>,
}

impl ResourceError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            details: None,
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error)
    }

    pub fn internal(error: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error)
    }
}

impl IntoResponse for ResourceError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<ProductError> for ResourceError {
    fn from(err: ProductError) -> Self {
        match &err {
            ProductError::InvalidPayload(_) => ResourceError::bad_request(err.to_string()),
            ProductError::NotFound(_) => ResourceError::not_found(err.to_string()),
            ProductError::UpdateFailed { .. } => {
                let details = err.attempt_summary();
                tracing::error!(
                    error = %err,
                    attempts = details.as_deref().unwrap_or_default(),
                    "Product update exhausted every strategy"
                );
                ResourceError {
                    details,
                    ..ResourceError::internal(err.to_string())
                }
            }
            ProductError::Database(_) => {
                tracing::error!(error = %err, "Product store failure");
                ResourceError::internal("Server error")
            }
        }
    }
}

impl From<ProfileError> for ResourceError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::NotFound(_) => ResourceError::not_found("Not found"),
            ProfileError::Database(_) => {
                tracing::error!(error = %err, "Profile store failure");
                ResourceError::internal("Server error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::domain::product::errors::StrategyFailure;

    #[test]
    fn test_registration_client_errors_are_bad_requests() {
        let err = ApiError::from(RegistrationError::UsernameAlreadyExists("alice".to_string()));

        assert_eq!(
            err,
            ApiError::BadRequest("Registration failed: Username already exists: alice".to_string())
        );
    }

    #[test]
    fn test_registration_store_failure_is_generic() {
        let err = ApiError::from(RegistrationError::Database("connection reset".to_string()));

        assert_eq!(err, ApiError::InternalServerError("Server error".to_string()));
    }

    #[test]
    fn test_login_failure_message() {
        assert_eq!(
            ApiError::from(LoginError::AuthFailed),
            ApiError::Unauthorized("Login failed.".to_string())
        );
    }

    #[test]
    fn test_update_failed_carries_attempts() {
        let err = ResourceError::from(ProductError::UpdateFailed {
            attempts: vec![
                StrategyFailure {
                    strategy: "in_place_save",
                    cause: RepositoryError::Database("timeout".to_string()),
                },
                StrategyFailure {
                    strategy: "replace_document",
                    cause: RepositoryError::Database("timeout".to_string()),
                },
            ],
        });

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error, "Failed to update product after multiple attempts");
        assert_eq!(
            err.details.as_deref(),
            Some(
                "in_place_save: Database error: timeout; replace_document: Database error: timeout"
            )
        );
    }

    #[test]
    fn test_product_not_found_message() {
        let err = ResourceError::from(ProductError::NotFound("p9".to_string()));

        assert_eq!(err, ResourceError::not_found("Product with ID p9 not found"));
    }

    #[test]
    fn test_profile_not_found_message() {
        let err = ResourceError::from(ProfileError::NotFound("x".to_string()));

        assert_eq!(err, ResourceError::not_found("Not found"));
    }
}
