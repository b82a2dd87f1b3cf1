//! API layer - HTTP handlers and routing
//!
//! Routes:
//! - `/` sitemap
//! - `/users`, `/tags`, `/articles`, `/articles/{id}`, `/articles_tags`
//!
//! Every success body is `{msg, data}`; every error body is `{msg}`.

pub mod articles;
pub mod articles_tags;
pub mod common;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod responses;
pub mod sitemap;
pub mod tags;
pub mod users;

use std::time::Duration;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub use error::ApiError;
pub use middleware::AppState;

/// Build the routes, without middleware
pub fn build_api_router() -> Router<AppState> {
    Router::new()
        .merge(sitemap::router())
        .merge(users::router())
        .merge(tags::router())
        .merge(articles::router())
        .merge(articles_tags::router())
        .fallback(fallback_handler)
}

/// Build the complete router with middleware.
///
/// # Errors
///
/// Returns an error if `server.cors_origin` is not a valid header value.
pub fn build_router(state: AppState, server: &ServerConfig) -> anyhow::Result<Router> {
    let cors = cors_layer(&server.cors_origin)?;
    let timeout = Duration::from_secs(server.request_timeout_secs);

    Ok(build_api_router()
        .layer(axum_middleware::from_fn_with_state(
            timeout,
            middleware::request_timeout,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    if origin.trim() == "*" {
        return Ok(cors.allow_origin(Any));
    }

    let origin = origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", origin))?;
    Ok(cors.allow_origin(origin))
}

async fn fallback_handler() -> ApiError {
    ApiError::not_found("resource not found")
}
