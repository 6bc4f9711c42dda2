//! # liorian-core
//!
//! Core crate for the Liorian training platform. Contains the storage
//! traits (key-value and object stores), configuration schemas, the
//! clock abstraction, domain events, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Liorian crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
