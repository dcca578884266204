//! Convenience result type alias for VaultShare.

use crate::error::AppError;

/// A specialized `Result` type for VaultShare operations.
pub type AppResult<T> = Result<T, AppError>;
