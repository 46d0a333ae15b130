use crate::db::errors::DbError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Malformed or missing request fields
    #[error("{message}")]
    Validation { message: String },

    /// Authentication required but not provided, or credentials invalid
    #[error("Not authenticated")]
    Unauthorized { message: Option<String> },

    /// Valid token, but wrong role or wrong tenant for the operation
    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    /// Requested resource absent, or not owned by the caller's tenant
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: String, id: String },

    /// Duplicate unique field or business-rule conflict
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Database operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Error::Forbidden { .. } => StatusCode::FORBIDDEN,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Conflict { .. } => StatusCode::CONFLICT,
            Error::Database(db_err) => match db_err {
                DbError::NotFound => StatusCode::NOT_FOUND,
                DbError::UniqueViolation { .. } => StatusCode::CONFLICT,
                DbError::ForeignKeyViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::CheckViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation { message } => message.clone(),
            Error::Unauthorized { message } => message
                .clone()
                .unwrap_or_else(|| "Authentication required".to_string()),
            Error::Forbidden { reason } => reason.clone(),
            Error::NotFound { resource, id } => format!("{resource} with ID {id} not found"),
            Error::Conflict { message } => message.clone(),
            Error::Database(db_err) => match db_err {
                DbError::NotFound => "Resource not found".to_string(),
                DbError::UniqueViolation { constraint, table, .. } => {
                    match (table.as_deref(), constraint.as_deref()) {
                        (Some("accounts"), Some(c)) if c.contains("email") => {
                            "An account with this email address already exists".to_string()
                        }
                        (Some("gyms"), Some(c)) if c.contains("code") => {
                            "A gym with this code already exists".to_string()
                        }
                        (Some("lockers"), Some(c)) if c.contains("number") => {
                            "This locker number is already in use".to_string()
                        }
                        _ => "Resource already exists".to_string(),
                    }
                }
                DbError::ForeignKeyViolation { .. } => {
                    "Invalid reference to related resource".to_string()
                }
                DbError::CheckViolation { .. } => "Invalid data provided".to_string(),
                DbError::Other(_) => "Internal server error".to_string(),
            },
            Error::Internal { .. } => "Internal server error".to_string(),
            Error::Other(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Full detail stays on the server side, at a level matching severity.
        match &self {
            Error::Database(DbError::Other(_)) | Error::Internal { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Database(_) | Error::Conflict { .. } => {
                tracing::warn!("Constraint error: {}", self);
            }
            Error::Unauthorized { .. } | Error::Forbidden { .. } => {
                tracing::info!("Authorization error: {}", self);
            }
            Error::Validation { .. } | Error::NotFound { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let status = self.status_code();
        let body = json!({ "error": self.user_message() });
        (status, axum::response::Json(body)).into_response()
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_match_taxonomy() {
        let cases = [
            (
                Error::Validation {
                    message: "bad".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (Error::Unauthorized { message: None }, StatusCode::UNAUTHORIZED),
            (
                Error::Forbidden {
                    reason: "wrong role".into(),
                },
                StatusCode::FORBIDDEN,
            ),
            (
                Error::NotFound {
                    resource: "Member".into(),
                    id: "x".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                Error::Conflict {
                    message: "dup".into(),
                },
                StatusCode::CONFLICT,
            ),
            (
                Error::Internal {
                    operation: "boom".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status);
        }
    }

    #[test]
    fn test_internal_errors_do_not_leak_detail() {
        let err = Error::Internal {
            operation: "connect to postgres at 10.0.0.3".into(),
        };
        assert_eq!(err.user_message(), "Internal server error");

        let err = Error::Other(anyhow::anyhow!("secret stack trace"));
        assert_eq!(err.user_message(), "Internal server error");
    }

    #[test]
    fn test_db_not_found_maps_to_404() {
        let err = Error::Database(DbError::NotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
