//! Application error types and their HTTP mapping.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level errors.
///
/// Store and internal errors are logged server-side and answered with a
/// generic body so no internal detail reaches the client.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bad credentials at login. The body never says whether the username
    /// existed (no user enumeration).
    #[error("Authentication failed")]
    AuthFailed,

    /// Missing, malformed, expired, or otherwise unusable bearer token.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Unique-constraint violation on insert (username or email taken).
    #[error("Conflict: record already exists")]
    DuplicateKey,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Config(msg) => {
                tracing::error!(error = %msg, "configuration error in request path");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::AuthFailed => (
                StatusCode::UNAUTHORIZED,
                "Invalid username or password".to_string(),
            ),
            AppError::NotAuthenticated => {
                (StatusCode::UNAUTHORIZED, "Not authenticated".to_string())
            }
            AppError::DuplicateKey => (
                StatusCode::CONFLICT,
                "Username or email already exists".to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::Db(e) => {
                tracing::error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({ "error": message }));
        if matches!(self, AppError::NotAuthenticated) {
            // Challenge header so clients know bearer auth is expected.
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_map_to_401() {
        assert_eq!(
            AppError::AuthFailed.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        let res = AppError::NotAuthenticated.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            res.headers()
                .get(header::WWW_AUTHENTICATE)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer")
        );
    }

    #[test]
    fn duplicate_key_maps_to_409() {
        assert_eq!(
            AppError::DuplicateKey.into_response().status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn store_errors_do_not_leak_detail() {
        let res = AppError::Db(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
