//! User repository: single-row reads and the registration insert.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

use super::DbPool;

/// Row of the `users` table. `password` holds the argon2 hash, never
/// plaintext, and is never serialized to a response.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Insert a new user. A unique-constraint violation on `username` or
/// `email` surfaces as [`AppError::DuplicateKey`]; there is no pre-check,
/// so concurrent registrations cannot race past the constraint.
pub async fn user_create(
    pool: &DbPool,
    username: &str,
    email: &str,
    password_hash: &str,
    role: &str,
) -> AppResult<UserRow> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (username, email, password, role)
        VALUES ($1, $2, $3, $4)
        RETURNING id, username, email, password, role, created_at
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await
    .map_err(map_insert_error)?;
    Ok(row)
}

pub async fn user_find_by_username(pool: &DbPool, username: &str) -> AppResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, email, password, role, created_at FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// The driver reports constraint violations structurally, so duplicate
/// detection does not depend on matching error message text.
fn map_insert_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::DuplicateKey,
        _ => AppError::Db(e),
    }
}
