//! Username/password authentication service built with Rust.
//!
//! User registration, credential verification, JWT issuance, and
//! JWT-protected endpoints over a PostgreSQL `users` table.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod users;

pub use auth::TokenService;
pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;

use axum::routing::{get, post};
use handlers::http;
use tower_http::cors::CorsLayer;

/// Build the API router (auth, users, health). Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    let auth_routes = axum::Router::new()
        .route("/token", post(auth::token))
        .route("/register", post(auth::register));

    let users_routes = axum::Router::new().route("/info", get(users::user_info));

    axum::Router::new()
        .route("/health", get(http::health))
        .nest("/auth", auth_routes)
        .nest("/users", users_routes)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
