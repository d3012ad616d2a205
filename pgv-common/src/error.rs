//! Common error types for PGV

use thiserror::Error;

/// Common result type for PGV operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the PGV crates
#[derive(Error, Debug)]
pub enum Error {
    /// Network or transport failure talking to the photo service
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response from the photo service
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// A page contained no images where an image position had to be resolved
    #[error("Empty page: {0}")]
    EmptyPage(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
