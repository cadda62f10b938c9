use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_profile::create_profile;
use super::handlers::delete_product::delete_product;
use super::handlers::get_profile::get_profile;
use super::handlers::health::health;
use super::handlers::list_products::list_products;
use super::handlers::list_profiles::list_profiles;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::search_products::search_products;
use super::handlers::update_product::update_product;
use super::handlers::ApiError;
use super::middleware::authenticate as auth_middleware;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::product::ports::ProductServicePort;
use crate::domain::profile::ports::ProfileServicePort;

/// Shared request state.
///
/// Services sit behind their ports so the router can be driven by any
/// repository implementation.
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub product_service: Arc<dyn ProductServicePort>,
    pub profile_service: Arc<dyn ProfileServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/products", get(list_products))
        .route("/api/products/", get(list_products))
        .route("/api/products/search", get(search_products))
        .route("/api/profiles", post(create_profile).get(list_profiles))
        .route("/api/profiles/", post(create_profile).get(list_profiles))
        .route("/api/profiles/:id", get(get_profile));

    let protected_routes = Router::new()
        .route("/api/products/:id", put(update_product).delete(delete_product))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(path_not_found)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn path_not_found() -> ApiError {
    ApiError::NotFound("Path not found".to_string())
}
