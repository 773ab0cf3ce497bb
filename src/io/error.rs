//! Error types for input validation, layout generation and export

use std::fmt;
use std::path::PathBuf;

use crate::io::configuration::{MAX_COUNT, MIN_COUNT};

/// Main error type for all shape operations
#[derive(Debug)]
pub enum ShapeError {
    /// Submitted text was empty or whitespace only
    EmptyInput,

    /// Submitted text is not an integer
    ///
    /// Covers free text as well as numeric text with a fractional part.
    NotAnInteger {
        /// The trimmed text that failed to parse
        input: String,
    },

    /// Submitted integer is outside the accepted count range
    OutOfRange {
        /// The parsed value
        value: i64,
        /// Smallest accepted count (inclusive)
        min: usize,
        /// Largest accepted count (inclusive)
        max: usize,
    },

    /// Layout engine cannot build a C shape from this many cells
    ///
    /// The search needs at least one cell per arm plus a spine row.
    Domain {
        /// Requested cell count
        count: usize,
        /// Smallest count the engine supports
        minimum: usize,
    },

    /// A parameter failed validation
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to encode or save a rendered image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl ShapeError {
    /// True for the three input validation failures shown as inline field feedback
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput | Self::NotAnInteger { .. } | Self::OutOfRange { .. }
        )
    }

    /// Convert an engine domain rejection into the equivalent input error
    ///
    /// Other variants pass through unchanged.
    #[must_use]
    pub fn into_input_error(self) -> Self {
        match self {
            Self::Domain { count, .. } => Self::OutOfRange {
                value: i64::try_from(count).unwrap_or(i64::MAX),
                min: MIN_COUNT,
                max: MAX_COUNT,
            },
            other => other,
        }
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "Please enter a number"),
            Self::NotAnInteger { .. } => write!(f, "Please enter a valid integer"),
            Self::OutOfRange { min, max, .. } => {
                write!(f, "Number must be between {min} and {max}")
            }
            Self::Domain { count, minimum } => {
                write!(
                    f,
                    "Cannot lay out {count} cells as a C shape (minimum {minimum})"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for ShapeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for shape results
pub type Result<T> = std::result::Result<T, ShapeError>;

impl From<std::io::Error> for ShapeError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ShapeError {
    ShapeError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error for a failed directory creation
pub fn create_dir_error(path: impl Into<PathBuf>, source: std::io::Error) -> ShapeError {
    ShapeError::FileSystem {
        path: path.into(),
        operation: "create directory",
        source,
    }
}
