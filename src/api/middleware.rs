//! Shared application state and request middleware

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::db::repositories::{
    SqlxArticleRepository, SqlxArticleTagRepository, SqlxTagRepository, SqlxUserRepository,
};
use crate::db::DynDatabasePool;
use crate::services::{ArticleService, ArticleTagService, TagService, UserService};

use super::error::ApiError;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub tag_service: Arc<TagService>,
    pub article_service: Arc<ArticleService>,
    pub article_tag_service: Arc<ArticleTagService>,
}

impl AppState {
    /// Wire the SQLx repositories and services on top of `pool`
    pub fn new(pool: DynDatabasePool) -> Self {
        Self {
            user_service: Arc::new(UserService::new(SqlxUserRepository::boxed(pool.clone()))),
            tag_service: Arc::new(TagService::new(SqlxTagRepository::boxed(pool.clone()))),
            article_service: Arc::new(ArticleService::new(SqlxArticleRepository::boxed(
                pool.clone(),
            ))),
            article_tag_service: Arc::new(ArticleTagService::new(
                SqlxArticleTagRepository::boxed(pool),
            )),
        }
    }
}

/// Bound the time spent on a single request.
///
/// A request that runs out of time is answered with 503.
pub async fn request_timeout(
    State(limit): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(%method, %uri, "Request timed out after {:?}", limit);
            ApiError::Unavailable("request timed out".to_string()).into_response()
        }
    }
}
