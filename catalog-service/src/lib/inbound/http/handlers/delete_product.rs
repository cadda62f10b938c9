use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use super::ResourceError;
use crate::domain::product::ports::ProductServicePort;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteProductData {
    pub success: bool,
}

pub async fn delete_product(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<DeleteProductData>, ResourceError> {
    let success = state.product_service.delete_product(&id).await?;

    tracing::info!(
        product_id = %id,
        account_id = %caller.account_id,
        deleted = success,
        "Product delete handled"
    );

    Ok(ApiSuccess::new(
        StatusCode::OK,
        DeleteProductData { success },
    ))
}
