use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Errors produced by the users domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    /// A field failed entity validation; the text is shown to the caller
    #[error("{0}")]
    Validation(String),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    /// Only raised by the HTTP layer; the service reports absence as `None`
    #[error("User with ID {0} not found")]
    NotFound(Uuid),

    /// Storage failure
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    pub(crate) fn database(err: impl std::fmt::Display) -> Self {
        UserError::Internal(format!("Database error: {}", err))
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(_) => AppError::BadRequest(err.to_string()),
            UserError::DuplicateEmail(_) => AppError::Conflict(err.to_string()),
            UserError::NotFound(_) => AppError::NotFound(err.to_string()),
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (UserError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (UserError::DuplicateEmail("a@b.c".into()), StatusCode::CONFLICT),
            (UserError::NotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (UserError::Internal("db down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            UserError::DuplicateEmail("matti@example.com".into()).to_string(),
            "User with email 'matti@example.com' already exists"
        );
        assert_eq!(
            UserError::NotFound(Uuid::nil()).to_string(),
            "User with ID 00000000-0000-0000-0000-000000000000 not found"
        );
        assert_eq!(UserError::Validation("Email cannot be empty".into()).to_string(), "Email cannot be empty");
    }
}
