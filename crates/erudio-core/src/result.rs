//! Result type aliases for Erudio.

use crate::ErudioError;

/// A specialized `Result` type for Erudio operations.
pub type ErudioResult<T> = Result<T, ErudioError>;
