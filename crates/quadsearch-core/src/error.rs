//! Error types for the store, embedding and index seams

use thiserror::Error;

/// Quad store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend rejected or failed the operation
    #[error("Store backend error: {0}")]
    Backend(String),

    /// Operation is not supported by this store
    #[error("Unsupported store operation: {0}")]
    Unsupported(String),

    /// Store is closed
    #[error("Store closed")]
    Closed,
}

/// Specialized Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create an unsupported-operation error
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Backend(_) => "backend",
            Self::Unsupported(_) => "unsupported",
            Self::Closed => "closed",
        }
    }
}

/// Embedding provider errors
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Transport failure talking to the provider
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Provider answered with an error status
    #[error("Provider error ({status}): {message}")]
    ProviderError {
        /// HTTP status or provider code
        status: u16,
        /// Body or message returned by the provider
        message: String,
    },

    /// Provider answered with something that is not an embedding
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Vector length disagrees with the configured dimensionality
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Configured dimensionality
        expected: usize,
        /// Length actually returned
        actual: usize,
    },

    /// Request timed out
    #[error("Request timed out after {timeout_secs}s")]
    Timeout {
        /// Timeout that elapsed
        timeout_secs: u64,
    },

    /// Provider could not be constructed
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// General error
    #[error("Embedding error: {0}")]
    Other(String),
}

/// Specialized Result type for embedding operations
pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

impl EmbeddingError {
    /// Check if retrying the request could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError(_) | Self::Timeout { .. } => true,
            Self::ProviderError { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::HttpError(_) => "http",
            Self::ProviderError { .. } => "provider",
            Self::InvalidResponse(_) => "invalid_response",
            Self::DimensionMismatch { .. } => "dimension_mismatch",
            Self::Timeout { .. } => "timeout",
            Self::ConfigError(_) => "config",
            Self::Other(_) => "other",
        }
    }
}

/// Search index errors
#[derive(Debug, Error)]
pub enum IndexError {
    /// Embedding a document or query failed
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    /// Reading the source store failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A vector does not fit the index schema
    #[error("Index dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Index dimensionality
        expected: usize,
        /// Offending vector length
        actual: usize,
    },

    /// Backend failure
    #[error("Index backend error: {0}")]
    Backend(String),
}

/// Specialized Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

impl IndexError {
    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Embedding(_) => "embedding",
            Self::Store(_) => "store",
            Self::DimensionMismatch { .. } => "dimension_mismatch",
            Self::Backend(_) => "backend",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_retryability() {
        assert!(EmbeddingError::HttpError("reset".into()).is_retryable());
        assert!(EmbeddingError::Timeout { timeout_secs: 5 }.is_retryable());
        assert!(EmbeddingError::ProviderError {
            status: 503,
            message: "busy".into()
        }
        .is_retryable());
        assert!(!EmbeddingError::ProviderError {
            status: 404,
            message: "no model".into()
        }
        .is_retryable());
        assert!(!EmbeddingError::InvalidResponse("garbage".into()).is_retryable());
    }

    #[test]
    fn test_index_error_wraps_embedding() {
        let err: IndexError = EmbeddingError::DimensionMismatch {
            expected: 4,
            actual: 3,
        }
        .into();
        assert_eq!(err.category(), "embedding");
        assert_eq!(err.to_string(), "Dimension mismatch: expected 4, got 3");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(StoreError::Closed.to_string(), "Store closed");
        assert_eq!(
            IndexError::DimensionMismatch {
                expected: 8,
                actual: 2
            }
            .to_string(),
            "Index dimension mismatch: expected 8, got 2"
        );
    }
}
