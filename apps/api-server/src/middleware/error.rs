//! HTTP error mapping for domain and handler-level failures.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use ripple_core::DomainError;
use ripple_core::error::RepoError;
use ripple_shared::ErrorResponse;

pub type AppResult<T> = Result<T, AppError>;

/// Application error - maps domain failures and handler-level problems
/// onto HTTP status codes with RFC 7807 bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        Self::Domain(DomainError::Repo(e))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Domain(e) => match e {
                DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                DomainError::NotFound { .. } | DomainError::CommentNotFound => {
                    StatusCode::NOT_FOUND
                }
                DomainError::Unauthorized => StatusCode::FORBIDDEN,
                DomainError::AlreadyLiked | DomainError::NotLiked => StatusCode::CONFLICT,
                DomainError::Repo(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::Domain(e) => match e {
                DomainError::Validation(report) => {
                    ErrorResponse::validation_failed(report.to_string())
                        .with_fields(report.fields().clone())
                }
                DomainError::NotFound { .. } | DomainError::CommentNotFound => {
                    ErrorResponse::not_found(e.to_string())
                }
                DomainError::Unauthorized => ErrorResponse::forbidden(),
                DomainError::AlreadyLiked | DomainError::NotLiked => {
                    ErrorResponse::conflict(e.to_string())
                }
                DomainError::Repo(repo) => {
                    tracing::error!(error = %repo, "repository failure");
                    ErrorResponse::internal_error()
                }
            },
            Self::BadRequest(detail) => ErrorResponse::bad_request(detail.clone()),
            Self::Unauthorized => ErrorResponse::unauthorized(),
            Self::Conflict(detail) => ErrorResponse::conflict(detail.clone()),
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "internal error");
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn maps_domain_errors_to_status_codes() {
        let not_found = AppError::from(DomainError::not_found("Post", Uuid::new_v4()));
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let forbidden = AppError::from(DomainError::Unauthorized);
        assert_eq!(forbidden.status_code(), StatusCode::FORBIDDEN);

        let conflict = AppError::from(DomainError::AlreadyLiked);
        assert_eq!(conflict.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn validation_errors_are_unprocessable() {
        let mut report = ripple_core::error::ValidationReport::new();
        report.push("text", "too short");
        let err = AppError::from(DomainError::Validation(report));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn login_failures_are_unauthorized() {
        assert_eq!(
            AppError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }
}
