//! Error types for seisdem

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for seisdem operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid extent: x [{xmin}, {xmax}], y [{ymin}, {ymax}] (need xmin < xmax and ymin < ymax)")]
    InvalidExtent {
        xmin: f64,
        xmax: f64,
        ymin: f64,
        ymax: f64,
    },

    #[error("Invalid resolution: ({x}, {y}) (both components must be finite and > 0)")]
    InvalidResolution { x: f64, y: f64 },

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Directory not found for output path: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Index out of bounds: ({row}, {col}) in raster of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unrecognized CRS identifier: {0}")]
    InvalidCrs(String),

    #[error("Unsupported data type: {0}")]
    UnsupportedDataType(String),

    #[error("TIFF error: {0}")]
    Tiff(String),

    #[error("Output path listed more than once: {}", .0.display())]
    DuplicateOutput(PathBuf),
}

impl From<tiff::TiffError> for Error {
    fn from(e: tiff::TiffError) -> Self {
        match e {
            tiff::TiffError::IoError(io) => Error::Io(io),
            other => Error::Tiff(other.to_string()),
        }
    }
}

/// Result type alias for seisdem operations
pub type Result<T> = std::result::Result<T, Error>;
