use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde_json::Value;

use super::list_products::ProductData;
use super::ApiSuccess;
use super::ResourceError;
use crate::domain::product::errors::ProductError;
use crate::domain::product::ports::ProductServicePort;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn update_product(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<ApiSuccess<ProductData>, ResourceError> {
    let Json(payload) =
        payload.map_err(|e| ProductError::InvalidPayload(e.body_text()))?;

    tracing::debug!(
        product_id = %id,
        account_id = %caller.account_id,
        role = %caller.role,
        "Product update requested"
    );

    let product = state.product_service.update_product(&id, payload).await?;

    Ok(ApiSuccess::new(StatusCode::OK, product.into()))
}
