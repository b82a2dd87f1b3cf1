//! Database layer
//!
//! This module provides database abstraction for inkpress.
//! It supports:
//! - SQLite (default, a local file)
//! - MySQL / MariaDB
//! - PostgreSQL
//!
//! The driver is selected from configuration, usually from the scheme of
//! `DATABASE_URL`.
//!
//! # Usage
//!
//! ```ignore
//! use inkpress::config::DatabaseConfig;
//! use inkpress::db::{create_pool, migrations};
//!
//! let config = DatabaseConfig::default();
//! let pool = create_pool(&config).await?;
//! migrations::run_migrations(&pool).await?;
//! pool.ping().await?;
//! ```

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{
    create_pool, create_test_pool, DatabasePool, DynDatabasePool, MysqlDatabase, PgDatabase,
    SqliteDatabase,
};

/// What went wrong in the store, as far as callers need to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// A UNIQUE constraint rejected the write
    UniqueViolation,
    /// A FOREIGN KEY constraint rejected the write
    ForeignKeyViolation,
    /// The store could not be reached (pool closed or exhausted, I/O failure)
    Unavailable,
    /// Anything else
    Other,
}

/// Classify a repository error by looking for the `sqlx::Error` in its chain.
pub fn classify(err: &anyhow::Error) -> StoreError {
    let Some(sqlx_err) = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<sqlx::Error>())
    else {
        return StoreError::Other;
    };

    match sqlx_err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::UniqueViolation
        }
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            StoreError::ForeignKeyViolation
        }
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::WorkerCrashed => StoreError::Unavailable,
        _ => StoreError::Other,
    }
}
