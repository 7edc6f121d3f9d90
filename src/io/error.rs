//! Error types and context management for solver operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all crate operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Failed to load the sample image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Sample grid has zero area
    EmptySample {
        /// Sample dimensions (rows, cols)
        dimensions: (usize, usize),
    },

    /// Data handed to an exporter doesn't meet its requirements
    InvalidSourceData {
        /// Description of what's wrong with the data
        reason: String,
    },

    /// Solver configuration failed validation
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A cell lost every candidate pattern under the strict conflict policy
    Contradiction {
        /// Output cell (column, row) that would become empty
        position: [usize; 2],
        /// Collapse count when this occurred
        iteration: usize,
    },

    /// Symbol has no colour in the export palette
    InvalidSymbol {
        /// The offending symbol
        symbol: usize,
        /// Number of colours in the palette
        palette_size: usize,
    },

    /// Failed to save a generated image to disk
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

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::EmptySample { dimensions } => {
                write!(
                    f,
                    "Sample grid is empty ({}x{})",
                    dimensions.0, dimensions.1
                )
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Contradiction {
                position,
                iteration,
            } => {
                write!(
                    f,
                    "Contradiction at cell ({}, {}) after {iteration} collapses",
                    position[0], position[1]
                )
            }
            Self::InvalidSymbol {
                symbol,
                palette_size,
            } => {
                write!(
                    f,
                    "Symbol {symbol} has no colour (palette size: {palette_size})"
                )
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

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for crate results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Current collapse count
    pub iteration: Option<usize>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches error messages with solver state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the iteration context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the iteration applied
    fn with_iteration(self, iteration: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<AlgorithmError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only contradictions carry solver progress
            if let AlgorithmError::Contradiction { iteration, .. } = &mut error {
                if let Some(iter) = context.iteration {
                    *iteration = iter;
                }
            }
            error
        })
    }

    fn with_iteration(self, iteration: usize) -> Result<T> {
        self.with_context(ErrorContext {
            iteration: Some(iteration),
            ..Default::default()
        })
    }
}

impl From<image::ImageError> for AlgorithmError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for AlgorithmError {
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
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an error for a path that can't be used as a target
pub fn invalid_path(path: impl Into<PathBuf>, reason: &str) -> AlgorithmError {
    let path = path.into();
    AlgorithmError::InvalidParameter {
        parameter: "path",
        value: path.display().to_string(),
        reason: reason.to_string(),
    }
}
