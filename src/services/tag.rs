//! Tag service
//!
//! Tags are read-only over HTTP. New tags only enter the system through
//! startup seeding, which reuses existing names.

use crate::db::repositories::TagRepository;
use crate::db::{classify, StoreError};
use crate::models::Tag;
use anyhow::Context;
use std::sync::Arc;

/// Error types for tag service operations
#[derive(Debug, thiserror::Error)]
pub enum TagServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The database could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(anyhow::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(anyhow::Error),
}

impl From<anyhow::Error> for TagServiceError {
    fn from(err: anyhow::Error) -> Self {
        match classify(&err) {
            StoreError::Unavailable => Self::Unavailable(err),
            _ => Self::InternalError(err),
        }
    }
}

/// Tag service for listing and seeding tags
pub struct TagService {
    repo: Arc<dyn TagRepository>,
}

impl TagService {
    /// Create a new tag service
    pub fn new(repo: Arc<dyn TagRepository>) -> Self {
        Self { repo }
    }

    /// List all tags, ordered by ID
    pub async fn list(&self) -> Result<Vec<Tag>, TagServiceError> {
        let tags = self.repo.list().await.context("Failed to list tags")?;
        Ok(tags)
    }

    /// Create a new tag or get the existing one with the same name.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    /// - `ValidationError` if the name is empty
    pub async fn create_or_get(&self, name: &str) -> Result<Tag, TagServiceError> {
        let trimmed_name = name.trim();
        if trimmed_name.is_empty() {
            return Err(TagServiceError::ValidationError(
                "Tag name cannot be empty".to_string(),
            ));
        }

        if let Some(existing) = self
            .repo
            .get_by_name(trimmed_name)
            .await
            .context("Failed to check existing tag")?
        {
            return Ok(existing);
        }

        match self.repo.create(&Tag::new(trimmed_name.to_string())).await {
            Ok(created) => {
                tracing::debug!(tag_id = created.id, name = %created.name, "Created tag");
                Ok(created)
            }
            // Lost a race with another writer; theirs is as good as ours.
            Err(e) if classify(&e) == StoreError::UniqueViolation => self
                .repo
                .get_by_name(trimmed_name)
                .await
                .context("Failed to reload tag")?
                .ok_or_else(|| e.context("Tag vanished after unique violation").into()),
            Err(e) => Err(e.context("Failed to create tag").into()),
        }
    }

    /// Make sure every name in `names` exists. Returns the resulting tags in
    /// the same order, duplicates included.
    pub async fn seed(&self, names: &[String]) -> Result<Vec<Tag>, TagServiceError> {
        let mut tags = Vec::with_capacity(names.len());
        for name in names {
            tags.push(self.create_or_get(name).await?);
        }
        if !tags.is_empty() {
            tracing::info!("Seeded {} tag(s)", tags.len());
        }
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxTagRepository;
    use crate::db::{create_test_pool, migrations};

    async fn setup_test_service() -> TagService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        TagService::new(SqlxTagRepository::boxed(pool))
    }

    #[tokio::test]
    async fn test_create_or_get_creates_then_reuses() {
        let service = setup_test_service().await;

        let first = service.create_or_get("rust").await.unwrap();
        let second = service.create_or_get("  rust  ").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_or_get_empty_name() {
        let service = setup_test_service().await;

        let result = service.create_or_get("   ").await;
        assert!(matches!(result, Err(TagServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let service = setup_test_service().await;
        let names = vec!["rust".to_string(), "web".to_string(), "rust".to_string()];

        let seeded = service.seed(&names).await.unwrap();
        assert_eq!(seeded.len(), 3);
        assert_eq!(seeded[0].id, seeded[2].id);

        service.seed(&names).await.unwrap();
        let listed: Vec<String> = service.list().await.unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(listed, vec!["rust", "web"]);
    }

    /// Misses on the first lookup only, as if another writer inserted the
    /// tag between lookup and insert.
    struct StaleFirstLookup {
        inner: Arc<dyn TagRepository>,
        lookups: std::sync::atomic::AtomicUsize,
    }

    #[async_trait::async_trait]
    impl TagRepository for StaleFirstLookup {
        async fn create(&self, tag: &Tag) -> anyhow::Result<Tag> {
            self.inner.create(tag).await
        }

        async fn get_by_name(&self, name: &str) -> anyhow::Result<Option<Tag>> {
            use std::sync::atomic::Ordering;
            if self.lookups.fetch_add(1, Ordering::SeqCst) == 0 {
                return Ok(None);
            }
            self.inner.get_by_name(name).await
        }

        async fn list(&self) -> anyhow::Result<Vec<Tag>> {
            self.inner.list().await
        }
    }

    #[tokio::test]
    async fn test_create_or_get_reuses_tag_after_unique_race() {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        let existing = TagService::new(SqlxTagRepository::boxed(pool.clone()))
            .create_or_get("rust")
            .await
            .unwrap();

        let racing = TagService::new(Arc::new(StaleFirstLookup {
            inner: SqlxTagRepository::boxed(pool),
            lookups: std::sync::atomic::AtomicUsize::new(0),
        }));
        let tag = racing.create_or_get("rust").await.unwrap();

        assert_eq!(tag, existing);
        assert_eq!(racing.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let service = setup_test_service().await;
        assert!(service.list().await.unwrap().is_empty());
    }
}
