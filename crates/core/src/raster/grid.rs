//! Georeferenced raster grid

use crate::crs::CRS;
use crate::error::{Error, Result};
use crate::extent::GridShape;
use crate::raster::{GeoTransform, RasterElement};
use ndarray::{Array2, ArrayView2};

/// A single-band grid of cells with its transform and CRS.
///
/// Data is stored row-major with shape `(rows, cols)`; row 0 is the
/// northern edge for north-up transforms.
///
/// ```ignore
/// use seisdem_core::{GeoTransform, Raster};
///
/// let mut dem: Raster<f32> = Raster::new(10, 10);
/// dem.set_transform(GeoTransform::from_origin(0.0, 10.0, 1.0, 1.0));
/// let z = dem.get(0, 0)?;
/// ```
#[derive(Debug, Clone)]
pub struct Raster<T: RasterElement> {
    data: Array2<T>,
    transform: GeoTransform,
    crs: Option<CRS>,
}

impl<T: RasterElement> Raster<T> {
    /// Zero-filled raster with a unit transform and no CRS
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::from_array(Array2::zeros((rows, cols)))
    }

    /// Wrap an existing array
    pub fn from_array(data: Array2<T>) -> Self {
        Self {
            data,
            transform: GeoTransform::default(),
            crs: None,
        }
    }

    /// Build from row-major samples
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        let array = Array2::from_shape_vec((rows, cols), data).map_err(|_| {
            Error::InvalidDimensions {
                width: cols,
                height: rows,
            }
        })?;
        Ok(Self::from_array(array))
    }

    /// Attach an array to a grid shape, checking that the dimensions agree
    pub fn georeferenced(data: Array2<T>, grid: &GridShape, crs: CRS) -> Result<Self> {
        if data.dim() != grid.shape() {
            let (rows, cols) = data.dim();
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }
        Ok(Self {
            data,
            transform: grid.transform,
            crs: Some(crs),
        })
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Value of the cell containing world coordinate `(x, y)`
    pub fn sample(&self, x: f64, y: f64) -> Option<T> {
        let (row, col) = self.transform.rowcol(x, y);
        if row < 0 || col < 0 {
            return None;
        }
        self.data.get((row as usize, col as usize)).copied()
    }

    pub fn view(&self) -> ArrayView2<'_, T> {
        self.data.view()
    }

    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: GeoTransform) {
        self.transform = transform;
    }

    pub fn crs(&self) -> Option<&CRS> {
        self.crs.as_ref()
    }

    pub fn set_crs(&mut self, crs: Option<CRS>) {
        self.crs = crs;
    }

    /// Geographic bounds (min_x, min_y, max_x, max_y)
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        self.transform.bounds(self.cols(), self.rows())
    }

    /// Centre of pixel (col, row) in world coordinates
    pub fn pixel_to_geo(&self, col: usize, row: usize) -> (f64, f64) {
        self.transform.pixel_to_geo(col, row)
    }

    /// Fractional (col, row) of a world coordinate
    pub fn geo_to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        self.transform.geo_to_pixel(x, y)
    }

    /// Min, max and mean over non-missing cells
    pub fn statistics(&self) -> RasterStatistics<T> {
        let mut min: Option<T> = None;
        let mut max: Option<T> = None;
        let mut sum = 0.0f64;
        let mut count = 0usize;

        for &value in self.data.iter().filter(|v| !v.is_missing()) {
            min = Some(min.map_or(value, |m| m.min(value)));
            max = Some(max.map_or(value, |m| m.max(value)));
            sum += value.to_f64().unwrap_or(0.0);
            count += 1;
        }

        RasterStatistics {
            min,
            max,
            mean: (count > 0).then(|| sum / count as f64),
            valid_count: count,
            missing_count: self.len() - count,
        }
    }
}

/// Summary of a raster's values
#[derive(Debug, Clone)]
pub struct RasterStatistics<T> {
    pub min: Option<T>,
    pub max: Option<T>,
    pub mean: Option<f64>,
    pub valid_count: usize,
    pub missing_count: usize,
}
