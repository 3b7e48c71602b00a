//! Domain-level error types.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Field-level validation failures: field name -> messages, in field order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport(BTreeMap<String, Vec<String>>);

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first failing field and its first message.
    pub fn first(&self) -> Option<(&str, &str)> {
        self.0
            .iter()
            .find_map(|(field, msgs)| msgs.first().map(|m| (field.as_str(), m.as_str())))
    }

    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.0
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first() {
            Some((field, message)) => write!(f, "{field}: {message}"),
            None => write!(f, "validation failed"),
        }
    }
}

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(ValidationReport),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("User not authorized")]
    Unauthorized,

    #[error("Post already liked")]
    AlreadyLiked,

    #[error("Post has not yet been liked")]
    NotLiked,

    #[error("Comment does not exist")]
    CommentNotFound,

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_surfaces_first_field_and_message() {
        let mut report = ValidationReport::new();
        report.push("text", "too short");
        report.push("text", "second message");
        report.push("status", "required");

        // BTreeMap ordering: "status" sorts before "text".
        assert_eq!(report.first(), Some(("status", "required")));
        assert_eq!(report.to_string(), "status: required");
    }

    #[test]
    fn empty_report_displays_generic_message() {
        let report = ValidationReport::new();
        assert!(report.is_empty());
        assert_eq!(report.to_string(), "validation failed");
    }
}
