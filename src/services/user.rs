//! User service
//!
//! Implements business logic for user management:
//! - Listing users
//! - Creating users with a unique email and a hashed password

use crate::db::repositories::UserRepository;
use crate::db::{classify, StoreError};
use crate::models::{CreateUserInput, User};
use crate::services::password::hash_password;
use crate::services::MISSING_FIELDS_MSG;
use anyhow::Context;
use std::sync::Arc;

/// Error types for user service operations
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// Validation error (missing or empty input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Another user already has this email
    #[error("Email already exists: {0}")]
    EmailTaken(String),

    /// The database could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(anyhow::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(anyhow::Error),
}

impl From<anyhow::Error> for UserServiceError {
    fn from(err: anyhow::Error) -> Self {
        match classify(&err) {
            StoreError::Unavailable => Self::Unavailable(err),
            _ => Self::InternalError(err),
        }
    }
}

/// User service for listing and creating users
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserService {
    /// Create a new user service with the given repository
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// List all users, ordered by ID
    pub async fn list(&self) -> Result<Vec<User>, UserServiceError> {
        let users = self.user_repo.list().await.context("Failed to list users")?;
        Ok(users)
    }

    /// Create a new active user.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if email or password is empty
    /// - `EmailTaken` if the email is already registered
    /// - `Unavailable` / `InternalError` for database errors
    pub async fn create(&self, input: CreateUserInput) -> Result<User, UserServiceError> {
        let email = normalize_email(&input.email);
        if email.is_empty() || input.password.is_empty() {
            return Err(UserServiceError::ValidationError(
                MISSING_FIELDS_MSG.to_string(),
            ));
        }

        // Not atomic with the insert; the UNIQUE constraint catches the race.
        if self
            .user_repo
            .get_by_email(&email)
            .await
            .context("Failed to check existing email")?
            .is_some()
        {
            return Err(UserServiceError::EmailTaken(email));
        }

        let password_hash = hash_password(&input.password)?;
        let user = User::new(email, password_hash);

        match self.user_repo.create(&user).await {
            Ok(created) => {
                tracing::info!(user_id = created.id, "Created user");
                Ok(created)
            }
            Err(e) if classify(&e) == StoreError::UniqueViolation => {
                Err(UserServiceError::EmailTaken(user.email))
            }
            Err(e) => Err(e.context("Failed to create user").into()),
        }
    }
}

/// Emails compare case-insensitively and without surrounding whitespace on
/// every backend, so they are stored trimmed and lowercased.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
