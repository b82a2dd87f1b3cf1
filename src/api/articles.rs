//! Article API endpoints
//!
//! Handles HTTP requests for article management:
//! - GET /articles - List articles
//! - GET /articles/{id} - Get one article
//! - POST /articles - Create an article
//! - PUT /articles/{id} - Update title and/or content
//! - DELETE /articles/{id} - Delete an article

use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;

use super::common::{missing_fields, present, present_id};
use super::error::ApiError;
use super::extract::{ApiJson, ArticleId};
use super::middleware::AppState;
use super::responses::{ArticleResponse, DeletedResponse, Envelope};
use crate::models::{CreateArticleInput, UpdateArticleInput};

/// Request body for POST /articles
#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub user_id: Option<i64>,
}

/// Request body for PUT /articles/{id}; absent or empty fields are kept
#[derive(Debug, Default, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/articles", get(list_articles_handler).post(create_article_handler))
        .route(
            "/articles/{id}",
            get(get_article_by_id_handler)
                .put(update_article_handler)
                .delete(delete_article_handler),
        )
}

/// GET /articles
pub async fn list_articles_handler(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<ArticleResponse>>>, ApiError> {
    let articles = state.article_service.list().await?;
    Ok(Json(Envelope::ok(
        articles.into_iter().map(ArticleResponse::from).collect(),
    )))
}

/// GET /articles/{id}
pub async fn get_article_by_id_handler(
    State(state): State<AppState>,
    ArticleId(id): ArticleId,
) -> Result<Json<Envelope<ArticleResponse>>, ApiError> {
    let article = state.article_service.get_by_id(id).await?;
    Ok(Json(Envelope::with_msg(
        format!("one article with id: {}", id),
        article.into(),
    )))
}

/// POST /articles
///
/// The user is not checked up front; an unknown `user_id` is rejected by the
/// store and reported as 400.
pub async fn create_article_handler(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateArticleRequest>,
) -> Result<Json<Envelope<ArticleResponse>>, ApiError> {
    let (Some(title), Some(content), Some(user_id)) = (
        present(body.title),
        present(body.content),
        present_id(body.user_id),
    ) else {
        return Err(missing_fields());
    };

    let article = state
        .article_service
        .create(CreateArticleInput::new(title, content, user_id))
        .await?;

    Ok(Json(Envelope::ok(article.into())))
}

/// PUT /articles/{id}
///
/// The body is optional; without one the article is returned unchanged.
pub async fn update_article_handler(
    State(state): State<AppState>,
    ArticleId(id): ArticleId,
    body: Option<ApiJson<UpdateArticleRequest>>,
) -> Result<Json<Envelope<ArticleResponse>>, ApiError> {
    let body = body.map(|ApiJson(body)| body).unwrap_or_default();
    let input = UpdateArticleInput {
        title: body.title,
        content: body.content,
    };
    let article = state.article_service.update(id, input).await?;

    Ok(Json(Envelope::with_msg(
        format!("updated article with id: {}", id),
        article.into(),
    )))
}

/// DELETE /articles/{id}
pub async fn delete_article_handler(
    State(state): State<AppState>,
    ArticleId(id): ArticleId,
) -> Result<Json<Envelope<DeletedResponse>>, ApiError> {
    state.article_service.delete(id).await?;

    Ok(Json(Envelope::with_msg(
        format!("deleted article with id: {}", id),
        DeletedResponse { id },
    )))
}
