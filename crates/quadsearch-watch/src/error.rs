//! Error types for change capture.

use thiserror::Error;

/// Errors raised while managing listeners.
#[derive(Error, Debug)]
pub enum Error {
    /// Listener workers are Tokio tasks and need a runtime to spawn on.
    #[error("No Tokio runtime available to run listener '{0}'")]
    NoRuntime(String),
}

/// Result type for change capture operations.
pub type Result<T> = std::result::Result<T, Error>;
