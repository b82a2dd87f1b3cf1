//! Article repository
//!
//! Database operations for articles.
//!
//! This module provides:
//! - `ArticleRepository` trait defining the interface for article data access
//! - `SqlxArticleRepository` implementing the trait for SQLite, MySQL and PostgreSQL
//!
//! Writes do not check that the owning user exists; the foreign key on
//! `articles.user_id` rejects dangling references.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{Article, CreateArticleInput, UpdateArticleInput};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{MySqlPool, PgPool, Row, SqlitePool};
use std::sync::Arc;

/// Article repository trait
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Create a new article
    async fn create(&self, input: &CreateArticleInput) -> Result<Article>;

    /// Get article by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Article>>;

    /// List all articles, ordered by ID
    async fn list(&self) -> Result<Vec<Article>>;

    /// Update title and/or content.
    ///
    /// Empty fields keep their stored value. Returns `None` if the article
    /// does not exist.
    async fn update(&self, id: i64, input: &UpdateArticleInput) -> Result<Option<Article>>;

    /// Delete an article. Returns `false` if there was nothing to delete.
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// SQLx-based article repository implementation
///
/// Supports SQLite, MySQL and PostgreSQL databases.
pub struct SqlxArticleRepository {
    pool: DynDatabasePool,
}

impl SqlxArticleRepository {
    /// Create a new SQLx article repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn ArticleRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl ArticleRepository for SqlxArticleRepository {
    async fn create(&self, input: &CreateArticleInput) -> Result<Article> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => create_article_sqlite(self.pool.sqlite()?, input).await,
            DatabaseDriver::Mysql => create_article_mysql(self.pool.mysql()?, input).await,
            DatabaseDriver::Postgres => create_article_postgres(self.pool.postgres()?, input).await,
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Article>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_article_by_id_sqlite(self.pool.sqlite()?, id).await,
            DatabaseDriver::Mysql => get_article_by_id_mysql(self.pool.mysql()?, id).await,
            DatabaseDriver::Postgres => get_article_by_id_postgres(self.pool.postgres()?, id).await,
        }
    }

    async fn list(&self) -> Result<Vec<Article>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_articles_sqlite(self.pool.sqlite()?).await,
            DatabaseDriver::Mysql => list_articles_mysql(self.pool.mysql()?).await,
            DatabaseDriver::Postgres => list_articles_postgres(self.pool.postgres()?).await,
        }
    }

    async fn update(&self, id: i64, input: &UpdateArticleInput) -> Result<Option<Article>> {
        // Lookup then write, without a transaction; last writer wins.
        let Some(existing) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        if !input.has_changes() {
            return Ok(Some(existing));
        }

        let merged = input.merge_into(&existing);
        match self.pool.driver() {
            DatabaseDriver::Sqlite => update_article_sqlite(self.pool.sqlite()?, &merged).await?,
            DatabaseDriver::Mysql => update_article_mysql(self.pool.mysql()?, &merged).await?,
            DatabaseDriver::Postgres => {
                update_article_postgres(self.pool.postgres()?, &merged).await?
            }
        }

        Ok(Some(merged))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => delete_article_sqlite(self.pool.sqlite()?, id).await,
            DatabaseDriver::Mysql => delete_article_mysql(self.pool.mysql()?, id).await,
            DatabaseDriver::Postgres => delete_article_postgres(self.pool.postgres()?, id).await,
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_article_sqlite(pool: &SqlitePool, input: &CreateArticleInput) -> Result<Article> {
    let result = sqlx::query(
        r#"
        INSERT INTO articles (title, content, user_id)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&input.title)
    .bind(&input.content)
    .bind(input.user_id)
    .execute(pool)
    .await
    .context("Failed to create article")?;

    Ok(Article {
        id: result.last_insert_rowid(),
        title: input.title.clone(),
        content: input.content.clone(),
        user_id: input.user_id,
    })
}

async fn get_article_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<Article>> {
    let row = sqlx::query("SELECT id, title, content, user_id FROM articles WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get article by ID")?;

    Ok(row.as_ref().map(row_to_article_sqlite))
}

async fn list_articles_sqlite(pool: &SqlitePool) -> Result<Vec<Article>> {
    let rows = sqlx::query("SELECT id, title, content, user_id FROM articles ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to list articles")?;

    Ok(rows.iter().map(row_to_article_sqlite).collect())
}

async fn update_article_sqlite(pool: &SqlitePool, article: &Article) -> Result<()> {
    sqlx::query("UPDATE articles SET title = ?, content = ? WHERE id = ?")
        .bind(&article.title)
        .bind(&article.content)
        .bind(article.id)
        .execute(pool)
        .await
        .context("Failed to update article")?;

    Ok(())
}

async fn delete_article_sqlite(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM articles WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete article")?;

    Ok(result.rows_affected() > 0)
}

fn row_to_article_sqlite(row: &sqlx::sqlite::SqliteRow) -> Article {
    Article {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        user_id: row.get("user_id"),
    }
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_article_mysql(pool: &MySqlPool, input: &CreateArticleInput) -> Result<Article> {
    let result = sqlx::query(
        r#"
        INSERT INTO articles (title, content, user_id)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&input.title)
    .bind(&input.content)
    .bind(input.user_id)
    .execute(pool)
    .await
    .context("Failed to create article")?;

    Ok(Article {
        id: result.last_insert_id() as i64,
        title: input.title.clone(),
        content: input.content.clone(),
        user_id: input.user_id,
    })
}

async fn get_article_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<Article>> {
    let row = sqlx::query("SELECT id, title, content, user_id FROM articles WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get article by ID")?;

    Ok(row.as_ref().map(row_to_article_mysql))
}

async fn list_articles_mysql(pool: &MySqlPool) -> Result<Vec<Article>> {
    let rows = sqlx::query("SELECT id, title, content, user_id FROM articles ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to list articles")?;

    Ok(rows.iter().map(row_to_article_mysql).collect())
}

async fn update_article_mysql(pool: &MySqlPool, article: &Article) -> Result<()> {
    sqlx::query("UPDATE articles SET title = ?, content = ? WHERE id = ?")
        .bind(&article.title)
        .bind(&article.content)
        .bind(article.id)
        .execute(pool)
        .await
        .context("Failed to update article")?;

    Ok(())
}

async fn delete_article_mysql(pool: &MySqlPool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM articles WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete article")?;

    Ok(result.rows_affected() > 0)
}

fn row_to_article_mysql(row: &sqlx::mysql::MySqlRow) -> Article {
    Article {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        user_id: row.get("user_id"),
    }
}

// ============================================================================
// PostgreSQL implementations
// ============================================================================

async fn create_article_postgres(pool: &PgPool, input: &CreateArticleInput) -> Result<Article> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO articles (title, content, user_id)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(&input.title)
    .bind(&input.content)
    .bind(input.user_id)
    .fetch_one(pool)
    .await
    .context("Failed to create article")?;

    Ok(Article {
        id,
        title: input.title.clone(),
        content: input.content.clone(),
        user_id: input.user_id,
    })
}

async fn get_article_by_id_postgres(pool: &PgPool, id: i64) -> Result<Option<Article>> {
    let row = sqlx::query("SELECT id, title, content, user_id FROM articles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get article by ID")?;

    Ok(row.as_ref().map(row_to_article_postgres))
}

async fn list_articles_postgres(pool: &PgPool) -> Result<Vec<Article>> {
    let rows = sqlx::query("SELECT id, title, content, user_id FROM articles ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to list articles")?;

    Ok(rows.iter().map(row_to_article_postgres).collect())
}

async fn update_article_postgres(pool: &PgPool, article: &Article) -> Result<()> {
    sqlx::query("UPDATE articles SET title = $1, content = $2 WHERE id = $3")
        .bind(&article.title)
        .bind(&article.content)
        .bind(article.id)
        .execute(pool)
        .await
        .context("Failed to update article")?;

    Ok(())
}

async fn delete_article_postgres(pool: &PgPool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM articles WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete article")?;

    Ok(result.rows_affected() > 0)
}

fn row_to_article_postgres(row: &sqlx::postgres::PgRow) -> Article {
    Article {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        user_id: row.get("user_id"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{classify, create_test_pool, migrations, StoreError};

    async fn setup_test_repo() -> (DynDatabasePool, SqlxArticleRepository) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        let repo = SqlxArticleRepository::new(pool.clone());
        (pool, repo)
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
        let (pool, repo) = setup_test_repo().await;
        let user_id = create_test_user(&pool).await;

        let created = repo
            .create(&CreateArticleInput::new("Title", "Body", user_id))
            .await
            .expect("Failed to create article");
        assert!(created.id > 0);

        let found = repo
            .get_by_id(created.id)
            .await
            .expect("Failed to get article")
            .expect("Article not found");
        assert_eq!(found, created);
        assert_eq!(found.user_id, user_id);
    }

    #[tokio::test]
    async fn test_get_article_not_found() {
        let (_pool, repo) = setup_test_repo().await;
        assert!(repo.get_by_id(99999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_with_unknown_user_is_fk_violation() {
        let (_pool, repo) = setup_test_repo().await;

        let err = repo
            .create(&CreateArticleInput::new("Title", "Body", 424242))
            .await
            .unwrap_err();

        assert_eq!(classify(&err), StoreError::ForeignKeyViolation);
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_articles() {
        let (pool, repo) = setup_test_repo().await;
        let user_id = create_test_user(&pool).await;

        for title in ["first", "second", "third"] {
            repo.create(&CreateArticleInput::new(title, "Body", user_id))
                .await
                .unwrap();
        }

        let titles: Vec<String> = repo.list().await.unwrap().into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_update_article_partial() {
        let (pool, repo) = setup_test_repo().await;
        let user_id = create_test_user(&pool).await;
        let created = repo
            .create(&CreateArticleInput::new("Keep me", "Old body", user_id))
            .await
            .unwrap();

        let update = UpdateArticleInput::new().with_title("").with_content("New body");
        let updated = repo
            .update(created.id, &update)
            .await
            .unwrap()
            .expect("Article not found");

        assert_eq!(updated.title, "Keep me");
        assert_eq!(updated.content, "New body");

        let stored = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_update_missing_article_returns_none() {
        let (_pool, repo) = setup_test_repo().await;
        let update = UpdateArticleInput::new().with_title("New");
        assert!(repo.update(12345, &update).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_article() {
        let (pool, repo) = setup_test_repo().await;
        let user_id = create_test_user(&pool).await;
        let created = repo
            .create(&CreateArticleInput::new("Doomed", "Body", user_id))
            .await
            .unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
        assert!(!repo.delete(created.id).await.unwrap());
    }
}
