//! Article/tag link endpoint
//!
//! - POST /articles_tags - Attach a tag to an article

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use super::common::{missing_fields, present_id};
use super::error::ApiError;
use super::extract::ApiJson;
use super::middleware::AppState;
use super::responses::{ArticleTagResponse, Envelope};
use crate::models::CreateArticleTagInput;

/// Request body for POST /articles_tags
#[derive(Debug, Deserialize)]
pub struct CreateArticleTagRequest {
    pub article_id: Option<i64>,
    pub tag_id: Option<i64>,
    pub extra_info: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/articles_tags", post(create_article_tag_handler))
}

/// POST /articles_tags
///
/// `extra_info` is optional and stored as given, empty included.
pub async fn create_article_tag_handler(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateArticleTagRequest>,
) -> Result<Json<Envelope<ArticleTagResponse>>, ApiError> {
    let (Some(article_id), Some(tag_id)) = (present_id(body.article_id), present_id(body.tag_id))
    else {
        return Err(missing_fields());
    };

    let input = CreateArticleTagInput {
        article_id,
        tag_id,
        extra_info: body.extra_info,
    };
    let link = state.article_tag_service.create(input).await?;

    Ok(Json(Envelope::ok(link.into())))
}
