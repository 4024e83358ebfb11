//! Core error types
//!
//! Errors raised while parsing user-facing values (sort direction, theme).
//! Malformed numeric data never produces an error; it degrades to the
//! lowest sort value instead.

use thiserror::Error;

/// Errors that can occur in the core library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Sort direction was not one of the accepted spellings
    #[error("Invalid sort direction: {0} (expected desc or asc)")]
    InvalidDirection(String),

    /// Theme name was not recognised
    #[error("Invalid theme: {0} (expected light or dark)")]
    InvalidTheme(String),

    /// Sort key was empty
    #[error("Sort key must not be empty")]
    EmptySortKey,
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
