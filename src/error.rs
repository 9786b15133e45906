//! Error types for db-select.
//!
//! Every failure a caller can see is one of four kinds, so callers can branch
//! on the kind instead of matching message text.

use thiserror::Error;

/// Main error type for db-select operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    /// Missing or malformed configuration values for a database key.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid caller input (fetch mode, identifiers).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Connectivity, authentication, or database-reported failures.
    #[error("Driver error: {0}")]
    Driver(String),

    /// Anything the other kinds do not cover (decode failures, malformed rows).
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Discriminant of [`SelectError`] without its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    Validation,
    Driver,
    Unexpected,
}

impl SelectError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a validation error with the given message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a driver error with the given message.
    pub fn driver(msg: impl Into<String>) -> Self {
        Self::Driver(msg.into())
    }

    /// Creates an unexpected error with the given message.
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Driver(_) => ErrorKind::Driver,
            Self::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// Returns the bare message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Config(msg)
            | Self::Validation(msg)
            | Self::Driver(msg)
            | Self::Unexpected(msg) => msg,
        }
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::Validation(_) => "Validation Error",
            Self::Driver(_) => "Driver Error",
            Self::Unexpected(_) => "Unexpected Error",
        }
    }
}

impl From<sqlx::Error> for SelectError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::Decode(_)
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::TypeNotFound { .. } => Self::Unexpected(error.to_string()),
            _ => Self::Driver(error.to_string()),
        }
    }
}

/// Result type alias using SelectError.
pub type Result<T> = std::result::Result<T, SelectError>;
