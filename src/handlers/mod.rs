pub mod http;

pub use http::{health, AppState};
