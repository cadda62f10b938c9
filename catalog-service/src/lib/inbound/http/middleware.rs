use auth::JwtError;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use http::header::AUTHORIZATION;

use crate::domain::account::models::AccountId;
use crate::domain::account::models::Role;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const NO_TOKEN: &str = "Access denied. No token provided.";
const TOKEN_EXPIRED: &str = "Token has expired. Please login again.";

/// Extension type carrying the verified caller of a protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
    pub role: Role,
}

/// Middleware that validates the session token and adds the caller to
/// request extensions.
///
/// Accepts both `Bearer <token>` and a bare token.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Session token rejected");
        match e {
            JwtError::TokenExpired => ApiError::Unauthorized(TOKEN_EXPIRED.to_string()),
            other => invalid_token(other),
        }
    })?;

    let role = claims.role.parse::<Role>().map_err(|e| {
        tracing::warn!(error = %e, "Session token carries an unknown role");
        invalid_token(e)
    })?;

    req.extensions_mut().insert(AuthenticatedAccount {
        account_id: AccountId::from_string(claims.sub),
        role,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized(NO_TOKEN.to_string()))?;

    let auth_str = auth_header.to_str().map_err(invalid_token)?;

    let token = match auth_str.strip_prefix("Bearer ") {
        Some(rest) => rest.trim(),
        None if auth_str.trim() == "Bearer" => "",
        None => auth_str.trim(),
    };

    if token.is_empty() {
        return Err(ApiError::Unauthorized(NO_TOKEN.to_string()));
    }

    Ok(token)
}

fn invalid_token(cause: impl std::fmt::Display) -> ApiError {
    ApiError::BadRequest(format!("Invalid token: {}", cause))
}
