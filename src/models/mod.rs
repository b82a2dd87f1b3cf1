//! Data models
//!
//! This module contains the data structures shared by the persistence,
//! service and API layers:
//! - Database entities (User, Article, Tag, ArticleTag)
//! - Typed inputs for create/update operations

mod article;
mod article_tag;
mod tag;
mod user;

pub use article::{Article, CreateArticleInput, UpdateArticleInput};
pub use article_tag::{ArticleTag, CreateArticleTagInput};
pub use tag::Tag;
pub use user::{CreateUserInput, User};
