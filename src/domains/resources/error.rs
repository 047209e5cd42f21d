//! Resource-specific error types.

use thiserror::Error;

/// Errors that can occur during resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The resource URI is not a `prompt://` URI.
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// The prompt's source file could not be read.
    #[error("Failed to read resource {uri}: {source}")]
    Io {
        uri: String,
        #[source]
        source: std::io::Error,
    },
}

impl ResourceError {
    /// Create a new "not found" error.
    pub fn not_found(uri: impl Into<String>) -> Self {
        Self::NotFound(uri.into())
    }

    /// Create a new "invalid URI" error.
    pub fn invalid_uri(uri: impl Into<String>) -> Self {
        Self::InvalidUri(uri.into())
    }

    /// Create a new I/O error for the given resource.
    pub fn io(uri: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            uri: uri.into(),
            source,
        }
    }
}
