//! Error types for the logging surface

use thiserror::Error;

/// Logging error type
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The global logging system was initialized twice
    #[error("Logging system already initialized")]
    AlreadyInitialized,

    /// The global logging system has not been initialized yet
    #[error("Logging system not initialized")]
    NotInitialized,

    /// The log directory failed the write preflight
    #[error("Log directory is not writable: {0}")]
    DirectoryNotWritable(String),

    /// A sink configuration entry is unusable
    #[error("Invalid sink configuration: {0}")]
    InvalidSink(String),

    /// Error installing the tracing subscriber
    #[error("Subscriber error: {0}")]
    Subscriber(String),

    /// Error with file I/O
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error with JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for logging operations
pub type LoggingResult<T> = Result<T, LoggingError>;
