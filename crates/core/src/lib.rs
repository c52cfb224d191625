//! # seisdem core
//!
//! Spatial primitives and raster I/O shared by the seisdem crates.
//!
//! This crate provides:
//! - `Extent`, `Resolution`, `GridShape`: validated grid construction
//! - `GeoTransform`: affine pixel-to-world mapping
//! - `CRS`: coordinate reference system descriptors
//! - `Raster<T>`: georeferenced single-band grid
//! - Native GeoTIFF reading and atomic writing

pub mod crs;
pub mod error;
pub mod extent;
pub mod io;
pub mod raster;

pub use crs::CRS;
pub use error::{Error, Result};
pub use extent::{Extent, GridShape, Resolution};
pub use raster::{GeoTransform, Raster, RasterElement};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::crs::CRS;
    pub use crate::error::{Error, Result};
    pub use crate::extent::{Extent, GridShape, Resolution};
    pub use crate::io::{read_geotiff, write_geotiff};
    pub use crate::raster::{GeoTransform, Raster, RasterElement};
}
