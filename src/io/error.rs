//! Error types for gallery layout operations
//!
//! Most runtime failures in the layout pipeline are absorbed where they occur
//! (missing documents, unresolvable images, exhausted placement attempts).
//! The variants here cover the conditions that genuinely stop a run.

use std::fmt;
use std::path::PathBuf;

/// Main error type for all gallery layout operations
#[derive(Debug)]
pub enum GalleryError {
    /// A JSON document could not be parsed where parsing is mandatory
    Json {
        /// Path of the offending document
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// Layout parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a rendered preview to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
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

impl fmt::Display for GalleryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { path, source } => {
                write!(f, "Invalid JSON in '{}': {source}", path.display())
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
                    "Failed to export preview to '{}': {source}",
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

impl std::error::Error for GalleryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::InvalidParameter { .. } => None,
        }
    }
}

/// Convenience type alias for gallery results
pub type Result<T> = std::result::Result<T, GalleryError>;

impl From<serde_json::Error> for GalleryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GalleryError {
    GalleryError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Attach a path and operation name to an I/O failure
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> GalleryError {
    GalleryError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
