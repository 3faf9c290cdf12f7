//! Error types and context management for mosaic operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Color transfer was given buffers with different pixel counts
    ShapeMismatch {
        /// Pixel count of the buffer being recolored
        source_pixels: usize,
        /// Pixel count of the buffer providing the statistics
        target_pixels: usize,
        /// Grid cell (column, row) being rendered, when known
        cell: Option<(usize, usize)>,
    },

    /// Parameter validation failed
    InvalidInput {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Target dimensions cannot be divided into whole tiles
    InvalidGeometry {
        /// Target width in pixels
        width: usize,
        /// Target height in pixels
        height: usize,
        /// Requested tile edge length in pixels
        tile_size: usize,
    },

    /// No tiles were provided or none could be loaded
    EmptyTileSet,

    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save the generated mosaic to disk
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

    /// Numerical or array computation produced an invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch {
                source_pixels,
                target_pixels,
                cell,
            } => {
                write!(
                    f,
                    "Pixel count mismatch: source has {source_pixels} pixels, target has {target_pixels}"
                )?;
                if let Some((col, row)) = cell {
                    write!(f, " (cell {col},{row})")?;
                }
                Ok(())
            }
            Self::InvalidInput {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid input '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidGeometry {
                width,
                height,
                tile_size,
            } => {
                write!(
                    f,
                    "Target size {width}x{height} is not a whole number of {tile_size}px tiles"
                )
            }
            Self::EmptyTileSet => write!(f, "Tile set is empty"),
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
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Grid cell (column, row) being processed
    pub cell: Option<(usize, usize)>,
    /// Operation being performed, recorded on computation failures
    pub operation: Option<&'static str>,
}

/// Enriches errors with the state of the build that produced them
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the cell coordinates
    ///
    /// # Errors
    ///
    /// Propagates the original error with the cell context applied
    fn with_cell(self, col: usize, row: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<MosaicError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                MosaicError::ShapeMismatch { cell, .. } if context.cell.is_some() => {
                    *cell = context.cell;
                }
                MosaicError::Computation { operation, reason } => {
                    if let Some(outer) = context.operation {
                        *reason = format!("{operation}: {reason}");
                        *operation = outer;
                    }
                    if let Some((col, row)) = context.cell {
                        *reason = format!("{reason} (cell {col},{row})");
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_cell(self, col: usize, row: usize) -> Result<T> {
        self.with_context(ErrorContext {
            cell: Some((col, row)),
            ..Default::default()
        })
    }
}

impl From<ndarray::ShapeError> for MosaicError {
    fn from(err: ndarray::ShapeError) -> Self {
        Self::Computation {
            operation: "array reshape",
            reason: err.to_string(),
        }
    }
}

/// Create an invalid input error
pub fn invalid_input(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidInput {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error for the given path
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> MosaicError {
    MosaicError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
