//! Error types for BedQuery
//!
//! Line-level parse failures live in [`crate::formats::bed::BedParseError`];
//! this module wraps them with the line number and content that caused them.

use crate::formats::bed::BedParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Maximum number of characters of an offending line kept in an error
const CONTENT_PREVIEW: usize = 100;

/// Main error type for BedQuery operations
#[derive(Debug, Error)]
pub enum BedQueryError {
    /// A feature or query line could not be parsed
    #[error("Malformed record at line {line}: {source} (line: '{content}')")]
    MalformedRecord {
        /// 1-based line number within its input
        line: usize,
        /// The offending line, truncated
        content: String,
        #[source]
        source: BedParseError,
    },

    /// A declared path could not be opened
    #[error("Cannot open '{}': {source}", .path.display())]
    IoUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error while reading or writing a stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BedQueryError {
    /// Wrap a parse failure with its position in the input
    pub fn malformed(line: usize, content: &str, source: BedParseError) -> Self {
        BedQueryError::MalformedRecord {
            line,
            content: content.chars().take(CONTENT_PREVIEW).collect(),
            source,
        }
    }

    /// Build an open failure for `path`
    pub fn unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BedQueryError::IoUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Check whether this is a parse failure
    pub fn is_malformed(&self) -> bool {
        matches!(self, BedQueryError::MalformedRecord { .. })
    }

    /// Line number of a parse failure, if any
    pub fn line_number(&self) -> Option<usize> {
        match self {
            BedQueryError::MalformedRecord { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result type alias for BedQuery operations
pub type Result<T> = std::result::Result<T, BedQueryError>;
