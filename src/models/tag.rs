//! Tag model

use serde::{Deserialize, Serialize};

/// A named label that can be attached to articles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    /// Tag name (unique)
    pub name: String,
}

impl Tag {
    /// Create a new Tag. The ID is assigned by the database.
    pub fn new(name: String) -> Self {
        Self { id: 0, name }
    }
}
