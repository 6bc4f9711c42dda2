//! Request handlers, one module per route group.

pub mod applications;
pub mod auth;
pub mod content;
pub mod health;
pub mod newsletter;
pub mod training;
