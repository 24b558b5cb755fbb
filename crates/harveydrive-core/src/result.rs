//! Convenience result type alias for HarveyDrive.

use crate::error::AppError;

/// A specialized `Result` type for HarveyDrive operations.
pub type AppResult<T> = Result<T, AppError>;
