//! Auth HTTP handlers: token (login) and register.

use axum::{extract::State, Form, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use validator::Validate;

use crate::auth::AuthService;
use crate::db::user_create;
use crate::error::AppError;
use crate::handlers::http::AppState;

const DEFAULT_ROLE: &str = "user";

/// Login form, submitted as `application/x-www-form-urlencoded`.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// POST /auth/token — verify credentials and mint a bearer token.
pub async fn token(
    State(state): State<AppState>,
    Form(form): Form<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let user = AuthService::verify_credentials(state.db(), &form.username, &form.password).await?;

    let access_token = state
        .tokens()
        .issue_access(&user.username)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("issue token: {}", e)))?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
    }))
}

/// POST /auth/register — create a user; 409 if username or email is taken.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let password_hash = AuthService::hash_password_blocking(body.password).await?;
    let user = user_create(
        state.db(),
        &body.username,
        &body.email,
        &password_hash,
        DEFAULT_ROLE,
    )
    .await?;

    info!(username = %user.username, "user registered");
    Ok(Json(json!({ "message": "Registration successful" })))
}
