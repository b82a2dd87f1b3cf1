//! Article/tag association model

use serde::{Deserialize, Serialize};

/// Link between an article and a tag, with optional free-text notes.
///
/// The same (article, tag) pair may be linked more than once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleTag {
    pub id: i64,
    pub article_id: i64,
    pub tag_id: i64,
    pub extra_info: Option<String>,
}

/// Input for linking a tag to an article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateArticleTagInput {
    pub article_id: i64,
    pub tag_id: i64,
    pub extra_info: Option<String>,
}

impl CreateArticleTagInput {
    pub fn new(article_id: i64, tag_id: i64) -> Self {
        Self {
            article_id,
            tag_id,
            extra_info: None,
        }
    }

    pub fn with_extra_info(mut self, extra_info: impl Into<String>) -> Self {
        self.extra_info = Some(extra_info.into());
        self
    }
}
