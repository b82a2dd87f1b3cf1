//! Article/tag link service

use crate::db::repositories::ArticleTagRepository;
use crate::db::{classify, StoreError};
use crate::models::{ArticleTag, CreateArticleTagInput};
use crate::services::MISSING_FIELDS_MSG;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ArticleTagServiceError {
    /// Missing ids, or ids that point nowhere
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Store unavailable: {0}")]
    Unavailable(anyhow::Error),

    #[error("Internal error: {0}")]
    InternalError(anyhow::Error),
}

impl From<anyhow::Error> for ArticleTagServiceError {
    fn from(err: anyhow::Error) -> Self {
        match classify(&err) {
            StoreError::Unavailable => Self::Unavailable(err),
            _ => Self::InternalError(err),
        }
    }
}

pub struct ArticleTagService {
    repo: Arc<dyn ArticleTagRepository>,
}

impl ArticleTagService {
    pub fn new(repo: Arc<dyn ArticleTagRepository>) -> Self {
        Self { repo }
    }

    /// Link a tag to an article. Existence of both is left to the store.
    pub async fn create(
        &self,
        input: CreateArticleTagInput,
    ) -> Result<ArticleTag, ArticleTagServiceError> {
        if input.article_id == 0 || input.tag_id == 0 {
            return Err(ArticleTagServiceError::ValidationError(
                MISSING_FIELDS_MSG.to_string(),
            ));
        }

        match self.repo.create(&input).await {
            Ok(link) => {
                tracing::info!(
                    article_id = link.article_id,
                    tag_id = link.tag_id,
                    "Linked tag to article"
                );
                Ok(link)
            }
            Err(e) if classify(&e) == StoreError::ForeignKeyViolation => {
                Err(ArticleTagServiceError::ValidationError(format!(
                    "article {} or tag {} does not exist",
                    input.article_id, input.tag_id
                )))
            }
            Err(e) => Err(e.context("Failed to link tag to article").into()),
        }
    }
}
