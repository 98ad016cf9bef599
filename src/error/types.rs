//! Custom error types with exit codes

use thiserror::Error;

/// Main error type for seqfetch operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FetchError {
    /// Configuration Error - invalid command-line input
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Git Error - a git invocation could not be spawned or exited unsuccessfully
    #[error("Git error: {message}")]
    Git { message: String },

    /// Filesystem Error - file operation failed
    #[error("Filesystem error: {message}")]
    Filesystem { message: String },

    /// Graph Error - the sequence graph could not be built or written
    #[error("Graph error: {message}")]
    Graph { message: String },
}

impl FetchError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::Configuration { .. } => 1,
            Self::Git { .. } => 2,
            Self::Filesystem { .. } => 3,
            Self::Graph { .. } => 4,
        }
    }

    /// Create a configuration error
    #[inline]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a git error
    #[inline]
    pub fn git<S: Into<String>>(message: S) -> Self {
        Self::Git {
            message: message.into(),
        }
    }

    /// Create a filesystem error
    #[inline]
    pub fn filesystem<S: Into<String>>(message: S) -> Self {
        Self::Filesystem {
            message: message.into(),
        }
    }

    /// Create a graph error
    #[inline]
    pub fn graph<S: Into<String>>(message: S) -> Self {
        Self::Graph {
            message: message.into(),
        }
    }
}
