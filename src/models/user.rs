//! User model
//!
//! Users own articles. They are created with an email and a password; the
//! password is only ever stored as an argon2 hash.

use serde::{Deserialize, Serialize};

/// User entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Email address (unique)
    pub email: String,
    /// Password hash (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether the account is active
    pub is_active: bool,
}

impl User {
    /// Create a new active User.
    ///
    /// The password must already be hashed, see
    /// `services::password::hash_password()`.
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: 0, // Will be set by the database
            email,
            password_hash,
            is_active: true,
        }
    }
}

/// Input for creating a new user (before password hashing)
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Email address
    pub email: String,
    /// Plaintext password (will be hashed)
    pub password: String,
}

impl CreateUserInput {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}
