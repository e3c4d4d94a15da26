//! Authentication: registration, credential verification, JWT.

mod handlers;
mod jwt;
mod service;

pub use handlers::{register, token};
pub use jwt::{Claims, TokenError, TokenService, ACCESS_TOKEN_TYPE};
pub use service::AuthService;
