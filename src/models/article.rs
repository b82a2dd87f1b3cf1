//! Article model
//!
//! This module defines the Article entity and the inputs used to create and
//! edit articles.

use serde::{Deserialize, Serialize};

/// Article entity. Every article belongs to a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    /// Unique identifier
    pub id: i64,
    /// Article title
    pub title: String,
    /// Article body
    pub content: String,
    /// Owning user (foreign key to users)
    pub user_id: i64,
}

/// Input for creating a new article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateArticleInput {
    pub title: String,
    pub content: String,
    /// The user is not looked up first; the store's foreign key decides.
    pub user_id: i64,
}

impl CreateArticleInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>, user_id: i64) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            user_id,
        }
    }
}

/// Input for a partial article update.
///
/// Only title and content can change. A field that is `None` or empty keeps
/// the stored value; any other string, whitespace included, replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateArticleInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdateArticleInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Apply this update to an existing article, returning the merged values.
    pub fn merge_into(&self, existing: &Article) -> Article {
        Article {
            id: existing.id,
            title: non_empty(&self.title).unwrap_or(&existing.title).to_string(),
            content: non_empty(&self.content).unwrap_or(&existing.content).to_string(),
            user_id: existing.user_id,
        }
    }

    /// Whether applying this update would change anything
    pub fn has_changes(&self) -> bool {
        non_empty(&self.title).is_some() || non_empty(&self.content).is_some()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
