//! Convenience result type alias for DashHub.

use crate::error::AppError;

/// A specialized `Result` type for DashHub operations.
///
/// Defined as a convenience so that every crate does not need to write
/// `Result<T, AppError>` explicitly.
pub type AppResult<T> = Result<T, AppError>;
