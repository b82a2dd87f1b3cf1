//! Shared API response types
//!
//! Every success body is an [`Envelope`] around one of the flat records
//! below. Records are built from models with `From`, so the wire shape never
//! depends on what the database row happens to carry.

use serde::{Deserialize, Serialize};

use crate::models::{Article, ArticleTag, Tag, User};

/// Message used by list and create endpoints
pub const OK_MSG: &str = "OK";

/// `{msg, data}` wrapper used by every success response
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub msg: String,
    pub data: T,
}

impl<T> Envelope<T> {
    /// Envelope with the plain `OK` message
    pub fn ok(data: T) -> Self {
        Self::with_msg(OK_MSG, data)
    }

    pub fn with_msg(msg: impl Into<String>, data: T) -> Self {
        Self {
            msg: msg.into(),
            data,
        }
    }
}

/// Public view of a user; the password hash is never part of it
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub is_active: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            title: article.title,
            content: article.content,
            user_id: article.user_id,
        }
    }
}

/// `extra_info` is serialized as `null` when absent, not omitted
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleTagResponse {
    pub id: i64,
    pub article_id: i64,
    pub tag_id: i64,
    pub extra_info: Option<String>,
}

impl From<ArticleTag> for ArticleTagResponse {
    fn from(link: ArticleTag) -> Self {
        Self {
            id: link.id,
            article_id: link.article_id,
            tag_id: link.tag_id,
            extra_info: link.extra_info,
        }
    }
}

/// Body of a successful delete
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeletedResponse {
    pub id: i64,
}

/// One entry of the root sitemap
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteInfo {
    pub method: String,
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_response_has_no_password() {
        let user = User {
            id: 3,
            email: "a@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            is_active: true,
        };

        let value = serde_json::to_value(Envelope::ok(UserResponse::from(user))).unwrap();
        assert_eq!(
            value,
            json!({"msg": "OK", "data": {"id": 3, "email": "a@example.com", "is_active": true}})
        );
    }

    #[test]
    fn test_article_tag_response_serializes_null_extra_info() {
        let link = ArticleTag {
            id: 1,
            article_id: 1,
            tag_id: 2,
            extra_info: None,
        };

        let value = serde_json::to_value(ArticleTagResponse::from(link)).unwrap();
        assert_eq!(value["extra_info"], serde_json::Value::Null);
        assert!(value.as_object().unwrap().contains_key("extra_info"));
    }

    #[test]
    fn test_article_response_fields() {
        let article = Article {
            id: 9,
            title: "T".to_string(),
            content: "C".to_string(),
            user_id: 4,
        };

        let value = serde_json::to_value(Envelope::with_msg("one article with id: 9", ArticleResponse::from(article))).unwrap();
        assert_eq!(
            value,
            json!({"msg": "one article with id: 9", "data": {"id": 9, "title": "T", "content": "C", "user_id": 4}})
        );
    }
}
