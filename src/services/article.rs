//! Article service
//!
//! Implements business logic for article management:
//! - Listing and fetching articles
//! - Creating articles for an existing user
//! - Partial updates of title and content
//! - Deleting articles

use crate::db::repositories::ArticleRepository;
use crate::db::{classify, StoreError};
use crate::models::{Article, CreateArticleInput, UpdateArticleInput};
use crate::services::MISSING_FIELDS_MSG;
use anyhow::Context;
use std::sync::Arc;

/// Error types for article service operations
#[derive(Debug, thiserror::Error)]
pub enum ArticleServiceError {
    /// Article not found
    #[error("Article not found: {0}")]
    NotFound(String),

    /// Validation error (missing fields, unknown user)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The database could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(anyhow::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(anyhow::Error),
}

impl From<anyhow::Error> for ArticleServiceError {
    fn from(err: anyhow::Error) -> Self {
        match classify(&err) {
            StoreError::Unavailable => Self::Unavailable(err),
            _ => Self::InternalError(err),
        }
    }
}

/// Article service
pub struct ArticleService {
    repo: Arc<dyn ArticleRepository>,
}

impl ArticleService {
    /// Create a new article service
    pub fn new(repo: Arc<dyn ArticleRepository>) -> Self {
        Self { repo }
    }

    /// List all articles, ordered by ID
    pub async fn list(&self) -> Result<Vec<Article>, ArticleServiceError> {
        let articles = self.repo.list().await.context("Failed to list articles")?;
        Ok(articles)
    }

    /// Get an article by ID.
    ///
    /// # Errors
    /// - `NotFound` if no article has this ID
    pub async fn get_by_id(&self, id: i64) -> Result<Article, ArticleServiceError> {
        self.repo
            .get_by_id(id)
            .await
            .context("Failed to get article")?
            .ok_or_else(|| not_found(id))
    }

    /// Create an article.
    ///
    /// The owning user is not looked up; if it does not exist the insert is
    /// rejected by the store and reported as a `ValidationError`.
    pub async fn create(&self, input: CreateArticleInput) -> Result<Article, ArticleServiceError> {
        if input.title.is_empty() || input.content.is_empty() || input.user_id == 0 {
            return Err(ArticleServiceError::ValidationError(
                MISSING_FIELDS_MSG.to_string(),
            ));
        }

        match self.repo.create(&input).await {
            Ok(article) => {
                tracing::info!(article_id = article.id, user_id = article.user_id, "Created article");
                Ok(article)
            }
            Err(e) if classify(&e) == StoreError::ForeignKeyViolation => {
                Err(ArticleServiceError::ValidationError(format!(
                    "user {} does not exist",
                    input.user_id
                )))
            }
            Err(e) => Err(e.context("Failed to create article").into()),
        }
    }

    /// Update title and/or content. Empty fields keep the stored value.
    ///
    /// # Errors
    /// - `NotFound` if no article has this ID
    pub async fn update(
        &self,
        id: i64,
        input: UpdateArticleInput,
    ) -> Result<Article, ArticleServiceError> {
        let updated = self
            .repo
            .update(id, &input)
            .await
            .context("Failed to update article")?
            .ok_or_else(|| not_found(id))?;

        tracing::info!(article_id = id, "Updated article");
        Ok(updated)
    }

    /// Delete an article, together with its tag links.
    ///
    /// # Errors
    /// - `NotFound` if no article has this ID
    pub async fn delete(&self, id: i64) -> Result<(), ArticleServiceError> {
        let deleted = self
            .repo
            .delete(id)
            .await
            .context("Failed to delete article")?;

        if !deleted {
            return Err(not_found(id));
        }

        tracing::info!(article_id = id, "Deleted article");
        Ok(())
    }
}

fn not_found(id: i64) -> ArticleServiceError {
    ArticleServiceError::NotFound(format!("article {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxArticleRepository;
    use crate::db::{create_test_pool, migrations, DynDatabasePool};

    async fn setup_test_service() -> (DynDatabasePool, ArticleService) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        let service = ArticleService::new(SqlxArticleRepository::boxed(pool.clone()));
        (pool, service)
    }

    /// Helper to create a user for article tests
    async fn create_test_user(pool: &DynDatabasePool) -> i64 {
        let result = sqlx::query("INSERT INTO users (email, password_hash) VALUES (?, ?)")
            .bind("author@example.com")
            .bind("hash123")
            .execute(pool.as_sqlite().unwrap())
            .await
            .expect("Failed to create test user");
        result.last_insert_rowid()
    }

    #[tokio::test]
    async fn test_create_and_get_article() {
        let (pool, service) = setup_test_service().await;
        let user_id = create_test_user(&pool).await;

        let created = service
            .create(CreateArticleInput::new("Hello", "World", user_id))
            .await
            .expect("Failed to create article");

        let fetched = service.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_missing_fields() {
        let (pool, service) = setup_test_service().await;
        let user_id = create_test_user(&pool).await;

        for input in [
            CreateArticleInput::new("", "content", user_id),
            CreateArticleInput::new("title", "", user_id),
            CreateArticleInput::new("title", "content", 0),
        ] {
            let result = service.create(input).await;
            assert!(matches!(result, Err(ArticleServiceError::ValidationError(_))));
        }
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_whitespace_fields_are_stored() {
        let (pool, service) = setup_test_service().await;
        let user_id = create_test_user(&pool).await;

        let created = service
            .create(CreateArticleInput::new("  ", "\t", user_id))
            .await
            .expect("whitespace is content");

        assert_eq!(created.title, "  ");
        assert_eq!(created.content, "\t");
    }

    #[tokio::test]
    async fn test_create_unknown_user() {
        let (_pool, service) = setup_test_service().await;

        let result = service
            .create(CreateArticleInput::new("Hello", "World", 77))
            .await;

        match result {
            Err(ArticleServiceError::ValidationError(msg)) => assert!(msg.contains("77")),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_article() {
        let (_pool, service) = setup_test_service().await;
        let result = service.get_by_id(5).await;
        assert!(matches!(result, Err(ArticleServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_empty_fields() {
        let (pool, service) = setup_test_service().await;
        let user_id = create_test_user(&pool).await;
        let created = service
            .create(CreateArticleInput::new("Title", "Body", user_id))
            .await
            .unwrap();

        let updated = service
            .update(created.id, UpdateArticleInput::new().with_title("").with_content("New"))
            .await
            .unwrap();
        assert_eq!(updated.title, "Title");
        assert_eq!(updated.content, "New");

        let updated = service
            .update(created.id, UpdateArticleInput::new().with_title("Renamed"))
            .await
            .unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.content, "New");
    }

    #[tokio::test]
    async fn test_update_missing_article() {
        let (_pool, service) = setup_test_service().await;
        let result = service
            .update(9, UpdateArticleInput::new().with_title("x"))
            .await;
        assert!(matches!(result, Err(ArticleServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_article() {
        let (pool, service) = setup_test_service().await;
        let user_id = create_test_user(&pool).await;
        let created = service
            .create(CreateArticleInput::new("Title", "Body", user_id))
            .await
            .unwrap();

        service.delete(created.id).await.unwrap();

        assert!(matches!(
            service.get_by_id(created.id).await,
            Err(ArticleServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(created.id).await,
            Err(ArticleServiceError::NotFound(_))
        ));
    }
}
