//! Root sitemap
//!
//! GET / lists every route the server answers.

use axum::{routing::get, Json, Router};

use super::middleware::AppState;
use super::responses::{Envelope, RouteInfo};

/// Every (method, path) pair registered by the router
pub const ROUTES: &[(&str, &str)] = &[
    ("GET", "/"),
    ("GET", "/users"),
    ("POST", "/users"),
    ("GET", "/tags"),
    ("GET", "/articles"),
    ("POST", "/articles"),
    ("GET", "/articles/{id}"),
    ("PUT", "/articles/{id}"),
    ("DELETE", "/articles/{id}"),
    ("POST", "/articles_tags"),
];

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(sitemap_handler))
}

/// GET /
pub async fn sitemap_handler() -> Json<Envelope<Vec<RouteInfo>>> {
    let routes = ROUTES
        .iter()
        .map(|(method, path)| RouteInfo {
            method: method.to_string(),
            path: path.to_string(),
        })
        .collect();

    Json(Envelope::ok(routes))
}
