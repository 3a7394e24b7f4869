use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::DbErr;
use std::fmt;
use tracing::{error, warn};

/// Missing resources are reported as 400 throughout this API, never 404.
#[derive(Debug)]
pub(crate) enum AppError {
    Db(DbErr),
    DatabaseError(String),
    Validation(String),
    Conflict(String),
    NotFound(String),
    BadRequest(String),
    Authentication(String),
    Unauthenticated(String),
    Forbidden,
    Internal(String),
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        Self::Db(err)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(err) => write!(f, "Database error: {}", err),
            AppError::DatabaseError(msg) => write!(f, "Database operation error: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Authentication(msg) => write!(f, "Authentication error: {}", msg),
            AppError::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
            AppError::Forbidden => write!(f, "Forbidden"),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Db(err) => {
                error!(error = %err, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database error".to_string())
            }
            AppError::DatabaseError(msg) => {
                error!(error = %msg, "database operation error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::Internal(msg) => {
                error!(error = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::Validation(msg)
            | AppError::Conflict(msg)
            | AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Authentication(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthenticated(msg) => {
                warn!(error = %msg, "authentication required");
                (StatusCode::UNAUTHORIZED, msg)
            }
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden".to_string()),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
