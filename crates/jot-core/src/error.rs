//! Error types for jot.

use thiserror::Error;

/// Result type alias using jot's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for jot operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed search or exclusion expression. Always fatal to the
    /// search call; never retried or silently recovered.
    #[error("Invalid search expression: {0}")]
    QuerySyntax(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Note file could not be read or its metadata block parsed
    #[error("Note file error: {0}")]
    Metadata(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No active note carries the given alias
    #[error("Alias '{0}' not found")]
    AliasNotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Editor invocation failed
    #[error("Editor error: {0}")]
    Editor(String),
}
