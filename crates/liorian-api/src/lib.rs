//! # liorian-api
//!
//! HTTP API layer for Liorian built on Axum.
//!
//! Serves the public login, newsletter, application and catalog routes,
//! and the bearer-protected admin and training routes, with CORS,
//! compression, request logging and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
