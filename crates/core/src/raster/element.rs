//! Cell value types

use num_traits::{Float, NumCast};
use std::fmt::{Debug, Display};

/// Floating-point types a raster cell may hold.
///
/// Elevation surfaces are continuous, so only `f32` and `f64` qualify.
/// NaN marks a missing cell.
pub trait RasterElement: Float + Debug + Display + Default + Send + Sync + 'static {
    /// Lossy conversion from `f64`, NaN if the value does not fit
    fn from_f64(value: f64) -> Self {
        <Self as NumCast>::from(value).unwrap_or_else(Self::nan)
    }

    /// Whether this value is missing
    fn is_missing(&self) -> bool {
        self.is_nan()
    }
}

impl RasterElement for f32 {}

impl RasterElement for f64 {}
