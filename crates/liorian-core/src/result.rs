//! Convenience result type alias for Liorian.

use crate::error::AppError;

/// A specialized `Result` type for Liorian operations.
pub type AppResult<T> = Result<T, AppError>;
