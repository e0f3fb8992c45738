//! Error types and path context for sorting operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Placeholder path used until a boundary error is given its real location
const UNKNOWN_PATH: &str = "<unknown>";

/// Main error type for all sorting operations
#[derive(Debug)]
pub enum SortError {
    /// An interval strategy or sort key name is not part of the catalog
    UnknownFunction {
        /// Which catalog was searched ("interval" or "sorting")
        kind: &'static str,
        /// The name that failed to resolve
        name: String,
        /// Names the catalog does provide
        available: Vec<&'static str>,
    },

    /// Buffer dimensions don't fit the requested operation
    ///
    /// Occurs when a crop reference is larger than the buffer, or when rows
    /// of differing lengths are assembled into one buffer.
    Dimension {
        /// Operation that detected the mismatch
        operation: &'static str,
        /// Dimensions required by the operation (width, height)
        expected: (usize, usize),
        /// Dimensions actually available (width, height)
        actual: (usize, usize),
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A mask-driven strategy was requested without a usable mask source
    MaskUnavailable {
        /// Description of what is missing
        reason: String,
    },

    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a sorted image to disk
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

    /// The command-line target can't be processed
    InvalidTarget {
        /// Target path given on the command line
        path: PathBuf,
        /// Why the target was rejected
        reason: String,
    },
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFunction {
                kind,
                name,
                available,
            } => {
                write!(
                    f,
                    "Unknown {kind} function '{name}' (available: {})",
                    available.join(", ")
                )
            }
            Self::Dimension {
                operation,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Dimension mismatch in {operation}: requires {}x{}, buffer is {}x{}",
                    expected.0, expected.1, actual.0, actual.1
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::MaskUnavailable { reason } => {
                write!(f, "Mask unavailable: {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
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
            Self::InvalidTarget { path, reason } => {
                write!(f, "Invalid target '{}': {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for SortError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for sorting results
pub type Result<T> = std::result::Result<T, SortError>;

/// Attaches a file path to boundary errors produced through `From` conversions
pub trait WithPath<T> {
    /// Replace the placeholder path of an image or file system error
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path filled in
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<SortError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only errors that came through a `From` conversion carry the placeholder
            match &mut error {
                SortError::ImageLoad { path: slot, .. }
                | SortError::ImageExport { path: slot, .. }
                | SortError::FileSystem { path: slot, .. }
                    if slot.as_path() == Path::new(UNKNOWN_PATH) =>
                {
                    *slot = path.to_path_buf();
                }
                _ => {}
            }
            error
        })
    }
}

impl From<image::ImageError> for SortError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

impl From<std::io::Error> for SortError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
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
) -> SortError {
    SortError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a dimension mismatch error
pub const fn dimension_error(
    operation: &'static str,
    expected: (usize, usize),
    actual: (usize, usize),
) -> SortError {
    SortError::Dimension {
        operation,
        expected,
        actual,
    }
}

/// Create an unknown function error for a catalog lookup
pub fn unknown_function(kind: &'static str, name: &str, available: &[&'static str]) -> SortError {
    SortError::UnknownFunction {
        kind,
        name: name.to_string(),
        available: available.to_vec(),
    }
}
