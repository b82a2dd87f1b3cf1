//! Tag repository
//!
//! Database operations for tags.
//!
//! This module provides:
//! - `TagRepository` trait defining the interface for tag data access
//! - `SqlxTagRepository` implementing the trait for SQLite, MySQL and PostgreSQL

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::Tag;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{MySqlPool, PgPool, Row, SqlitePool};
use std::sync::Arc;

/// Tag repository trait
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Create a new tag
    async fn create(&self, tag: &Tag) -> Result<Tag>;

    /// Get tag by name
    async fn get_by_name(&self, name: &str) -> Result<Option<Tag>>;

    /// List all tags, ordered by ID
    async fn list(&self) -> Result<Vec<Tag>>;
}

/// SQLx-based tag repository implementation
///
/// Supports SQLite, MySQL and PostgreSQL databases.
pub struct SqlxTagRepository {
    pool: DynDatabasePool,
}

impl SqlxTagRepository {
    /// Create a new SQLx tag repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn TagRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl TagRepository for SqlxTagRepository {
    async fn create(&self, tag: &Tag) -> Result<Tag> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => create_tag_sqlite(self.pool.sqlite()?, tag).await,
            DatabaseDriver::Mysql => create_tag_mysql(self.pool.mysql()?, tag).await,
            DatabaseDriver::Postgres => create_tag_postgres(self.pool.postgres()?, tag).await,
        }
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Tag>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_tag_by_name_sqlite(self.pool.sqlite()?, name).await,
            DatabaseDriver::Mysql => get_tag_by_name_mysql(self.pool.mysql()?, name).await,
            DatabaseDriver::Postgres => {
                get_tag_by_name_postgres(self.pool.postgres()?, name).await
            }
        }
    }

    async fn list(&self) -> Result<Vec<Tag>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_tags_sqlite(self.pool.sqlite()?).await,
            DatabaseDriver::Mysql => list_tags_mysql(self.pool.mysql()?).await,
            DatabaseDriver::Postgres => list_tags_postgres(self.pool.postgres()?).await,
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_tag_sqlite(pool: &SqlitePool, tag: &Tag) -> Result<Tag> {
    let result = sqlx::query("INSERT INTO tags (name) VALUES (?)")
        .bind(&tag.name)
        .execute(pool)
        .await
        .context("Failed to create tag")?;

    Ok(Tag {
        id: result.last_insert_rowid(),
        name: tag.name.clone(),
    })
}

async fn get_tag_by_name_sqlite(pool: &SqlitePool, name: &str) -> Result<Option<Tag>> {
    let row = sqlx::query("SELECT id, name FROM tags WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await
        .context("Failed to get tag by name")?;

    Ok(row.as_ref().map(row_to_tag_sqlite))
}

async fn list_tags_sqlite(pool: &SqlitePool) -> Result<Vec<Tag>> {
    let rows = sqlx::query("SELECT id, name FROM tags ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to list tags")?;

    Ok(rows.iter().map(row_to_tag_sqlite).collect())
}

fn row_to_tag_sqlite(row: &sqlx::sqlite::SqliteRow) -> Tag {
    Tag {
        id: row.get("id"),
        name: row.get("name"),
    }
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_tag_mysql(pool: &MySqlPool, tag: &Tag) -> Result<Tag> {
    let result = sqlx::query("INSERT INTO tags (name) VALUES (?)")
        .bind(&tag.name)
        .execute(pool)
        .await
        .context("Failed to create tag")?;

    Ok(Tag {
        id: result.last_insert_id() as i64,
        name: tag.name.clone(),
    })
}

async fn get_tag_by_name_mysql(pool: &MySqlPool, name: &str) -> Result<Option<Tag>> {
    let row = sqlx::query("SELECT id, name FROM tags WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await
        .context("Failed to get tag by name")?;

    Ok(row.as_ref().map(row_to_tag_mysql))
}

async fn list_tags_mysql(pool: &MySqlPool) -> Result<Vec<Tag>> {
    let rows = sqlx::query("SELECT id, name FROM tags ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to list tags")?;

    Ok(rows.iter().map(row_to_tag_mysql).collect())
}

fn row_to_tag_mysql(row: &sqlx::mysql::MySqlRow) -> Tag {
    Tag {
        id: row.get("id"),
        name: row.get("name"),
    }
}

// ============================================================================
// PostgreSQL implementations
// ============================================================================

async fn create_tag_postgres(pool: &PgPool, tag: &Tag) -> Result<Tag> {
    let id: i64 = sqlx::query_scalar("INSERT INTO tags (name) VALUES ($1) RETURNING id")
        .bind(&tag.name)
        .fetch_one(pool)
        .await
        .context("Failed to create tag")?;

    Ok(Tag {
        id,
        name: tag.name.clone(),
    })
}

async fn get_tag_by_name_postgres(pool: &PgPool, name: &str) -> Result<Option<Tag>> {
    let row = sqlx::query("SELECT id, name FROM tags WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await
        .context("Failed to get tag by name")?;

    Ok(row.as_ref().map(row_to_tag_postgres))
}

async fn list_tags_postgres(pool: &PgPool) -> Result<Vec<Tag>> {
    let rows = sqlx::query("SELECT id, name FROM tags ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to list tags")?;

    Ok(rows.iter().map(row_to_tag_postgres).collect())
}

fn row_to_tag_postgres(row: &sqlx::postgres::PgRow) -> Tag {
    Tag {
        id: row.get("id"),
        name: row.get("name"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{classify, create_test_pool, migrations, StoreError};

    async fn setup_test_repo() -> SqlxTagRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxTagRepository::new(pool)
    }

    #[tokio::test]
    async fn test_create_tag() {
        let repo = setup_test_repo().await;

        let created = repo
            .create(&Tag::new("rust".to_string()))
            .await
            .expect("Failed to create tag");

        assert!(created.id > 0);
        assert_eq!(created.name, "rust");
    }

    #[tokio::test]
    async fn test_create_duplicate_name_is_unique_violation() {
        let repo = setup_test_repo().await;
        repo.create(&Tag::new("rust".to_string())).await.unwrap();

        let err = repo.create(&Tag::new("rust".to_string())).await.unwrap_err();
        assert_eq!(classify(&err), StoreError::UniqueViolation);
    }

    #[tokio::test]
    async fn test_get_tag_by_name() {
        let repo = setup_test_repo().await;
        let created = repo.create(&Tag::new("web".to_string())).await.unwrap();

        let found = repo
            .get_by_name("web")
            .await
            .expect("Failed to get tag")
            .expect("Tag not found");
        assert_eq!(found, created);

        assert!(repo.get_by_name("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_tags_ordered_by_id() {
        let repo = setup_test_repo().await;
        assert!(repo.list().await.unwrap().is_empty());

        for name in ["zeta", "alpha", "mid"] {
            repo.create(&Tag::new(name.to_string())).await.unwrap();
        }

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }
}
