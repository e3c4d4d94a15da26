//! Auth middleware: resolves the bearer token to the current user.

use axum::http::header::AUTHORIZATION;
use tracing::debug;

use crate::db::{user_find_by_username, UserRow};
use crate::error::AppError;
use crate::handlers::http::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Extractor: the user authenticated by the request's bearer token.
///
/// Every failure path (missing header, malformed/expired/forged token,
/// token without a subject, subject with no matching user) collapses to
/// [`AppError::NotAuthenticated`]; the internal reason goes to the logs
/// only.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub UserRow);

#[axum::async_trait]
impl axum::extract::FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix(BEARER_PREFIX))
            .ok_or_else(|| {
                debug!("request rejected: missing or non-bearer Authorization header");
                AppError::NotAuthenticated
            })?;

        let claims = state.tokens().decode(token).map_err(|e| {
            debug!(reason = %e, "request rejected: token decode failed");
            AppError::NotAuthenticated
        })?;

        let username = claims.sub.ok_or_else(|| {
            debug!("request rejected: token carries no subject");
            AppError::NotAuthenticated
        })?;

        let user = user_find_by_username(state.db(), &username)
            .await?
            .ok_or_else(|| {
                debug!(username, "request rejected: subject not found");
                AppError::NotAuthenticated
            })?;

        Ok(CurrentUser(user))
    }
}
