//! Services layer - Business logic
//!
//! Services sit between the HTTP handlers and the repositories. They are
//! responsible for:
//! - Validating typed inputs
//! - Detecting conflicts and missing rows
//! - Translating store constraint violations into domain errors

pub mod article;
pub mod article_tag;
pub mod password;
pub mod tag;
pub mod user;

pub use article::{ArticleService, ArticleServiceError};
pub use article_tag::{ArticleTagService, ArticleTagServiceError};
pub use password::hash_password;
pub use tag::{TagService, TagServiceError};
pub use user::{UserService, UserServiceError};

/// Message returned when a required field is missing or empty
pub const MISSING_FIELDS_MSG: &str = "all fields are required";
