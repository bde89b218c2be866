//! Convenience result type alias for DonaHub.

use crate::error::AppError;

/// A specialized `Result` type for DonaHub operations.
pub type AppResult<T> = Result<T, AppError>;
