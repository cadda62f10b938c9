use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use super::ResourceError;
use crate::domain::product::models::Product;
use crate::domain::product::ports::ProductServicePort;
use crate::inbound::http::router::AppState;

/// Canonical product representation.
///
/// Optional fields are serialized as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductData {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: Option<String>,
    #[serde(rename = "inStock")]
    pub in_stock: Option<bool>,
}

impl From<Product> for ProductData {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name,
            price: product.price,
            category: product.category,
            in_stock: product.in_stock,
        }
    }
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ProductData>>, ResourceError> {
    let products = state.product_service.list_products().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        products.into_iter().map(ProductData::from).collect(),
    ))
}
