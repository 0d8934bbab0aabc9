//! Error types for logging setup

use thiserror::Error;

/// Errors that can occur while installing the global subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Log directory or file could not be created
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rolling file appender could not be built
    #[error("Appender error: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),

    /// Default level is not a valid filter directive
    #[error("Invalid filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    /// A global subscriber is already installed
    #[error("Init error: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Result type for logging setup
pub type LoggingResult<T> = Result<T, LoggingError>;
