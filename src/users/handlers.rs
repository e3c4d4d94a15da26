//! User HTTP handlers.

use axum::Json;
use serde::Serialize;

use crate::middleware::CurrentUser;

/// Public view of a user. The password hash is never part of a response.
#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub username: String,
    pub email: String,
}

/// GET /users/info — the user behind the presented bearer token.
pub async fn user_info(CurrentUser(user): CurrentUser) -> Json<UserInfoResponse> {
    Json(UserInfoResponse {
        username: user.username,
        email: user.email,
    })
}
