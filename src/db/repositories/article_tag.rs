//! Article/tag link repository

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{ArticleTag, CreateArticleTagInput};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{MySqlPool, PgPool, SqlitePool};
use std::sync::Arc;

/// Repository for rows of `articles_tags`
#[async_trait]
pub trait ArticleTagRepository: Send + Sync {
    /// Link a tag to an article. Both must exist; the pair need not be new.
    async fn create(&self, input: &CreateArticleTagInput) -> Result<ArticleTag>;
}

/// SQLx-based implementation for SQLite, MySQL and PostgreSQL
pub struct SqlxArticleTagRepository {
    pool: DynDatabasePool,
}

impl SqlxArticleTagRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn ArticleTagRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl ArticleTagRepository for SqlxArticleTagRepository {
    async fn create(&self, input: &CreateArticleTagInput) -> Result<ArticleTag> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => create_article_tag_sqlite(self.pool.sqlite()?, input).await,
            DatabaseDriver::Mysql => create_article_tag_mysql(self.pool.mysql()?, input).await,
            DatabaseDriver::Postgres => {
                create_article_tag_postgres(self.pool.postgres()?, input).await
            }
        }
    }
}

async fn create_article_tag_sqlite(
    pool: &SqlitePool,
    input: &CreateArticleTagInput,
) -> Result<ArticleTag> {
    let result = sqlx::query(
        "INSERT INTO articles_tags (article_id, tag_id, extra_info) VALUES (?, ?, ?)",
    )
    .bind(input.article_id)
    .bind(input.tag_id)
    .bind(&input.extra_info)
    .execute(pool)
    .await
    .context("Failed to link tag to article")?;

    Ok(ArticleTag {
        id: result.last_insert_rowid(),
        article_id: input.article_id,
        tag_id: input.tag_id,
        extra_info: input.extra_info.clone(),
    })
}

async fn create_article_tag_mysql(
    pool: &MySqlPool,
    input: &CreateArticleTagInput,
) -> Result<ArticleTag> {
    let result = sqlx::query(
        "INSERT INTO articles_tags (article_id, tag_id, extra_info) VALUES (?, ?, ?)",
    )
    .bind(input.article_id)
    .bind(input.tag_id)
    .bind(&input.extra_info)
    .execute(pool)
    .await
    .context("Failed to link tag to article")?;

    Ok(ArticleTag {
        id: result.last_insert_id() as i64,
        article_id: input.article_id,
        tag_id: input.tag_id,
        extra_info: input.extra_info.clone(),
    })
}

async fn create_article_tag_postgres(
    pool: &PgPool,
    input: &CreateArticleTagInput,
) -> Result<ArticleTag> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO articles_tags (article_id, tag_id, extra_info) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(input.article_id)
    .bind(input.tag_id)
    .bind(&input.extra_info)
    .fetch_one(pool)
    .await
    .context("Failed to link tag to article")?;

    Ok(ArticleTag {
        id,
        article_id: input.article_id,
        tag_id: input.tag_id,
        extra_info: input.extra_info.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{classify, create_test_pool, migrations, StoreError};
    use sqlx::Row;

    /// Pool with one user, one article (id 1) and two tags (ids 1 and 2)
    async fn setup_test_repo() -> (DynDatabasePool, SqlxArticleTagRepository) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        for sql in [
            "INSERT INTO users (email, password_hash) VALUES ('a@example.com', 'h')",
            "INSERT INTO articles (title, content, user_id) VALUES ('t', 'c', 1)",
            "INSERT INTO tags (name) VALUES ('rust')",
            "INSERT INTO tags (name) VALUES ('web')",
        ] {
            pool.execute(sql).await.expect("Failed to seed");
        }

        let repo = SqlxArticleTagRepository::new(pool.clone());
        (pool, repo)
    }

    #[tokio::test]
    async fn test_create_link_without_extra_info() {
        let (pool, repo) = setup_test_repo().await;

        let link = repo
            .create(&CreateArticleTagInput::new(1, 2))
            .await
            .expect("Failed to link");

        assert!(link.id > 0);
        assert_eq!(link.article_id, 1);
        assert_eq!(link.tag_id, 2);
        assert!(link.extra_info.is_none());

        let row = sqlx::query("SELECT extra_info FROM articles_tags WHERE id = ?")
            .bind(link.id)
            .fetch_one(pool.as_sqlite().unwrap())
            .await
            .unwrap();
        let stored: Option<String> = row.get("extra_info");
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn test_create_link_with_extra_info_and_duplicates() {
        let (_pool, repo) = setup_test_repo().await;

        let first = repo
            .create(&CreateArticleTagInput::new(1, 1).with_extra_info("primary"))
            .await
            .unwrap();
        let second = repo.create(&CreateArticleTagInput::new(1, 1)).await.unwrap();

        assert_eq!(first.extra_info.as_deref(), Some("primary"));
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_create_link_to_missing_rows_is_fk_violation() {
        let (_pool, repo) = setup_test_repo().await;

        let err = repo.create(&CreateArticleTagInput::new(99, 1)).await.unwrap_err();
        assert_eq!(classify(&err), StoreError::ForeignKeyViolation);

        let err = repo.create(&CreateArticleTagInput::new(1, 99)).await.unwrap_err();
        assert_eq!(classify(&err), StoreError::ForeignKeyViolation);
    }
}
