mod handlers;

pub use handlers::{user_info, UserInfoResponse};
