use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::list_products::ProductData;
use super::ApiSuccess;
use super::ResourceError;
use crate::domain::product::ports::ProductServicePort;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub name: String,
}

pub async fn search_products(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<ApiSuccess<Vec<ProductData>>, ResourceError> {
    let Query(params) = params.map_err(|e| {
        tracing::warn!(error = %e, "Rejected search query");
        ResourceError::bad_request(e.body_text())
    })?;

    let products = state.product_service.search_products(&params.name).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        products.into_iter().map(ProductData::from).collect(),
    ))
}
