//! Error types for tznorm-core.
//!
//! This module defines the error types used throughout the library:
//! parse failures and rejected timezone designators. Parse functions
//! that signal failure with a sentinel (`Option::None`) instead of an
//! error are documented as such on the function itself.

use thiserror::Error;

/// The main error type for normalization operations.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// A timestamp carried a timezone designator that is not allowed
    /// in its context (e.g. a non-UTC offset passed to the UTC-only parser).
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Error parsing timestamp input.
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Result type alias for normalization operations.
pub type Result<T> = std::result::Result<T, NormalizeError>;
