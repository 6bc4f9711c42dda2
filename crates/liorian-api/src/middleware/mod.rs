//! Axum middleware stack.

pub mod auth;
pub mod compression;
pub mod cors;
pub mod logging;

pub use auth::{BearerToken, NO_TOKEN_MESSAGE, require_bearer};
