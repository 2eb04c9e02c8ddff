//! Custom error types for lovelog.
//!
//! The core pipeline has exactly one hard failure: a transcript that yields
//! zero structured messages. Everything else at line level is tolerated by
//! silent exclusion in the parser, so the error surface here stays small.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for lovelog operations.
#[derive(Error, Debug)]
pub enum LovelogError {
    // =========================================================================
    // Transcript Errors
    // =========================================================================
    /// Transcript file not found at the specified path.
    #[error("Transcript not found at '{path}'")]
    TranscriptNotFound { path: PathBuf },

    /// The transcript contained zero lines matching the message grammar.
    ///
    /// Per-line noise (system notices, continuation lines) is dropped
    /// silently; this fires only when nothing at all parsed.
    #[error("No messages parsed: the file contains no recognizable chat lines")]
    EmptyTranscript,

    // =========================================================================
    // IO Errors
    // =========================================================================
    /// File read/write error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Path-specific IO error with context.
    #[error("Failed to {operation} '{path}': {source}")]
    Path {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // Generic Errors
    // =========================================================================
    /// Catch-all for other errors with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Wrapped anyhow error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for lovelog operations.
pub type Result<T> = std::result::Result<T, LovelogError>;

impl LovelogError {
    /// Create a transcript not found error.
    pub fn transcript_not_found(path: impl Into<PathBuf>) -> Self {
        Self::TranscriptNotFound { path: path.into() }
    }

    /// Create a path error with context.
    pub fn path_error(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Path {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Wrap an error with additional context.
    pub fn with_context<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Check if this error is recoverable (user can fix it and retry).
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::TranscriptNotFound { .. } | Self::EmptyTranscript
        )
    }

    /// Get a suggestion for how to fix this error, if applicable.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::TranscriptNotFound { .. } => {
                Some("Verify the path points at an exported chat .txt file.")
            }
            Self::EmptyTranscript => Some(
                "Expected lines like '[01/01/25, 09:00:00 AM] Name: text'. \
                 Export the chat as text (without media) and try again.",
            ),
            _ => None,
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error.
    ///
    /// # Errors
    ///
    /// Returns the original error wrapped with additional context.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily (only evaluated on error).
    ///
    /// # Errors
    ///
    /// Returns the original error wrapped with additional context.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| LovelogError::with_context(context, e))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| LovelogError::with_context(f(), e))
    }
}
