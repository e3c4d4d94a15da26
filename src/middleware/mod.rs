//! Request-scoped middleware: the bearer-token extractor lives here.

pub mod auth;

pub use auth::CurrentUser;
