//! Mutation inputs with their declarative field rules.
//!
//! Each input type carries its constraints as `validator` attributes; the
//! services run them through [`crate::validate::check`] before any write.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::error::{DomainError, ValidationReport};

/// Input for creating or updating a post.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostInput {
    #[validate(length(min = 2, max = 1000, message = "text must be between 2 and 1000 characters"))]
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Input for creating or updating a comment.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentInput {
    #[validate(length(min = 2, max = 50, message = "text must be between 2 and 50 characters"))]
    pub text: String,
}

/// Input for the profile upsert. `status` and `skills` are required;
/// everything else is copied through only when present.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProfileInput {
    #[validate(length(min = 1, max = 150, message = "status must be between 1 and 150 characters"))]
    pub status: String,
    /// Comma-delimited; split and trimmed by the service.
    #[validate(length(min = 1, max = 50, message = "skills must be between 1 and 50 characters"))]
    pub skills: String,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub github_username: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
    #[validate(nested)]
    pub experience: Option<Vec<ExperienceInput>>,
    #[validate(nested)]
    pub education: Option<Vec<EducationInput>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExperienceInput {
    #[validate(length(min = 1, max = 150, message = "title must be between 1 and 150 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 150, message = "company must be between 1 and 150 characters"))]
    pub company: String,
    pub location: Option<String>,
    #[validate(length(min = 1, max = 150, message = "from must be between 1 and 150 characters"))]
    pub from: String,
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EducationInput {
    #[validate(length(min = 1, max = 150, message = "school must be between 1 and 150 characters"))]
    pub school: String,
    #[validate(length(min = 1, max = 150, message = "degree must be between 1 and 150 characters"))]
    pub degree: String,
    #[validate(length(
        min = 1,
        max = 150,
        message = "field_of_study must be between 1 and 150 characters"
    ))]
    pub field_of_study: String,
    #[validate(length(min = 1, max = 150, message = "from must be between 1 and 150 characters"))]
    pub from: String,
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

/// Post search filter. Each date bound applies independently; `name` is an
/// exact match. `page` arrives as a string and is coerced to a page index.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchFilter {
    pub name: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub page: Option<String>,
}

impl SearchFilter {
    /// Coerce `page` to a number, defaulting to the first page.
    pub fn page_index(&self) -> Result<u64, DomainError> {
        match self.page.as_deref() {
            None | Some("") => Ok(0),
            Some(raw) => raw.trim().parse().map_err(|_| {
                let mut report = ValidationReport::new();
                report.push("page", "page must be a non-negative number");
                DomainError::Validation(report)
            }),
        }
    }
}
