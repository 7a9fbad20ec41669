// Centralized error handling module
// Every engine operation reports failures through HashUtilityError

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the checksum engine
/// Carries the offending path and operation so messages can be shown verbatim
#[derive(Debug, Error)]
pub enum HashUtilityError {
    /// Configuration errors, detected before any computation starts
    #[error("Invalid arguments: {message}\nSuggestion: Run with --help to see usage information")]
    InvalidArguments { message: String },

    #[error("Missing required argument: {argument}\nSuggestion: Run with --help to see required arguments")]
    MissingRequiredArgument { argument: String },

    #[error("Unsupported hash algorithm: {algorithm}\nSuggestion: Use one of md5, sha256, sha512 (see 'csguard algorithms')")]
    UnsupportedAlgorithm { algorithm: String },

    #[error("invalid output format for {}. supported format 'txt', 'json', 'yaml'", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// File system errors with context
    #[error("File not found: {}\nSuggestion: Check that the file path is correct and the file exists", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Directory not found: {}\nSuggestion: Check that the directory path is correct and the directory exists", .path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Permission denied while {operation} {}\nSuggestion: Check file permissions or run with appropriate privileges", .path.display())]
    PermissionDenied { path: PathBuf, operation: String },

    #[error("I/O error while {operation}{}: {source}", .path.as_ref().map(|p| format!(" {}", p.display())).unwrap_or_default())]
    IoError {
        path: Option<PathBuf>,
        operation: String,
        #[source]
        source: io::Error,
    },

    #[error("Error walking directory {}: {reason}", .path.display())]
    TraversalFailed { path: PathBuf, reason: String },

    /// Checksum file errors
    #[error("invalid line: {line} ({}:{line_number})", .path.display())]
    InvalidLine {
        path: PathBuf,
        line_number: usize,
        line: String,
    },

    #[error("Error parsing {format} checksum file {}: {reason}", .path.display())]
    DatabaseParseError {
        path: PathBuf,
        format: String,
        reason: String,
    },

    #[error("Failed to write checksum file {}: {reason}\nSuggestion: Check disk space and write permissions", .path.display())]
    DatabaseWriteError { path: PathBuf, reason: String },
}

impl HashUtilityError {
    /// Create an error from io::Error with context about the operation and optional path
    pub fn from_io_error(err: io::Error, operation: &str, path: Option<PathBuf>) -> Self {
        match (err.kind(), path) {
            (io::ErrorKind::NotFound, Some(p)) => {
                if operation.contains("directory") {
                    HashUtilityError::DirectoryNotFound { path: p }
                } else {
                    HashUtilityError::FileNotFound { path: p }
                }
            }
            (io::ErrorKind::PermissionDenied, Some(p)) => HashUtilityError::PermissionDenied {
                path: p,
                operation: operation.to_string(),
            },
            (_, path) => HashUtilityError::IoError {
                path,
                operation: operation.to_string(),
                source: err,
            },
        }
    }

    /// Shorthand for configuration errors raised while building the run config
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        HashUtilityError::InvalidArguments {
            message: message.into(),
        }
    }
}

impl From<io::Error> for HashUtilityError {
    fn from(err: io::Error) -> Self {
        HashUtilityError::from_io_error(err, "unknown operation", None)
    }
}

pub type Result<T> = std::result::Result<T, HashUtilityError>;
