//! Tag API endpoints
//!
//! - GET /tags - List tags

use axum::{extract::State, routing::get, Json, Router};

use super::error::ApiError;
use super::middleware::AppState;
use super::responses::{Envelope, TagResponse};

pub fn router() -> Router<AppState> {
    Router::new().route("/tags", get(list_tags_handler))
}

/// GET /tags
pub async fn list_tags_handler(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<TagResponse>>>, ApiError> {
    let tags = state.tag_service.list().await?;
    Ok(Json(Envelope::ok(
        tags.into_iter().map(TagResponse::from).collect(),
    )))
}
