//! Error types for the documentation index
//!
//! This module provides structured error types using thiserror for better
//! error handling and actionable error messages.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for indexing operations
#[derive(Error, Debug)]
pub enum IndexError {
    /// File system errors
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A documentation comment could not be parsed
    #[error("Failed to parse doc comment at byte {offset}: {source}")]
    CommentParse {
        offset: usize,
        #[source]
        source: ParseError,
    },

    /// Symbol path nests deeper than the tree allows
    #[error("Max depth exceeded for '{path}': {depth} segments (limit {max})")]
    DepthExceeded {
        path: String,
        depth: usize,
        max: usize,
    },

    /// Configuration errors
    #[error("Invalid configuration: {reason}")]
    ConfigError { reason: String },

    /// General errors for cases where we need to preserve existing behavior
    #[error("{0}")]
    General(String),
}

impl IndexError {
    /// Get a stable status code for this error type.
    ///
    /// Returns a string identifier that can be used in JSON responses
    /// for programmatic error handling.
    pub fn status_code(&self) -> String {
        match self {
            Self::FileRead { .. } => "FILE_READ_ERROR",
            Self::CommentParse { .. } => "COMMENT_PARSE_ERROR",
            Self::DepthExceeded { .. } => "DEPTH_EXCEEDED",
            Self::ConfigError { .. } => "CONFIG_ERROR",
            Self::General(_) => "GENERAL_ERROR",
        }
        .to_string()
    }

    /// Whether the error aborts construction of the index rather than a
    /// single file's contribution to it
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::DepthExceeded { .. })
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::CommentParse { .. } => vec![
                "Check the comment for an unclosed '{' in a type expression",
                "Set indexing.strict_comments = false to skip malformed comments",
            ],
            Self::DepthExceeded { .. } => vec![
                "Symbol paths are limited to 10 segments",
                "Look for a @namespace or @property name that repeats its owner",
            ],
            Self::FileRead { .. } => vec![
                "Check that the file exists and you have read permissions",
                "Ensure the file is valid UTF-8",
            ],
            Self::ConfigError { .. } => vec![
                "Run 'docindex config' to print the effective settings",
            ],
            Self::General(_) => vec![],
        }
    }
}

/// Errors produced by the comment grammar parser
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unterminated type expression starting at byte {offset}")]
    UnterminatedType { offset: usize },

    #[error("Text is not a block comment")]
    NotAComment,
}

/// Result type alias for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Result type alias for parse operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context(self, msg: &str) -> Result<T, IndexError>;

    /// Add context with a path
    fn with_path(self, path: &std::path::Path) -> Result<T, IndexError>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: &str) -> Result<T, IndexError> {
        self.map_err(|e| IndexError::General(format!("{msg}: {e}")))
    }

    fn with_path(self, path: &std::path::Path) -> Result<T, IndexError> {
        self.map_err(|e| {
            IndexError::General(format!("Error processing '{}': {}", path.display(), e))
        })
    }
}
