//! Bounding extents, pixel resolution and the grid shape derived from them

use crate::error::{Error, Result};
use crate::raster::GeoTransform;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding rectangle in CRS units.
///
/// Always satisfies `xmin < xmax` and `ymin < ymax` with finite bounds;
/// the fields are private so the only way in is [`Extent::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 4]", into = "[f64; 4]")]
pub struct Extent {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
}

impl Extent {
    /// Create a validated extent
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Self> {
        let finite = [xmin, xmax, ymin, ymax].iter().all(|v| v.is_finite());
        if !finite || xmin >= xmax || ymin >= ymax {
            return Err(Error::InvalidExtent {
                xmin,
                xmax,
                ymin,
                ymax,
            });
        }
        Ok(Self {
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }

    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    /// Size along x
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Size along y
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Whether `(x, y)` lies inside the closed rectangle
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.xmin && x <= self.xmax && y >= self.ymin && y <= self.ymax
    }
}

impl TryFrom<[f64; 4]> for Extent {
    type Error = Error;

    fn try_from(b: [f64; 4]) -> Result<Self> {
        Extent::new(b[0], b[1], b[2], b[3])
    }
}

impl From<Extent> for [f64; 4] {
    fn from(e: Extent) -> Self {
        [e.xmin, e.xmax, e.ymin, e.ymax]
    }
}

/// Ground size of one pixel along each axis, both strictly positive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct Resolution {
    x: f64,
    y: f64,
}

impl Resolution {
    pub fn new(x: f64, y: f64) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(x) || !valid(y) {
            return Err(Error::InvalidResolution { x, y });
        }
        Ok(Self { x, y })
    }

    /// Same resolution on both axes
    pub fn square(size: f64) -> Result<Self> {
        Self::new(size, size)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

impl TryFrom<(f64, f64)> for Resolution {
    type Error = Error;

    fn try_from((x, y): (f64, f64)) -> Result<Self> {
        Resolution::new(x, y)
    }
}

impl From<Resolution> for (f64, f64) {
    fn from(r: Resolution) -> Self {
        (r.x, r.y)
    }
}

/// Pixel grid laid over an extent: dimensions plus georeferencing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridShape {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Transform anchored at the top-left corner `(xmin, ymax)`
    pub transform: GeoTransform,
}

impl GridShape {
    /// Derive the grid for `extent` at `resolution`.
    ///
    /// Dimensions are truncated toward zero, so a remainder smaller than one
    /// pixel is dropped from the east and south edges. Existing fixtures
    /// depend on these exact sizes.
    pub fn new(extent: &Extent, resolution: &Resolution) -> Result<Self> {
        let width = (extent.width() / resolution.x()).trunc() as usize;
        let height = (extent.height() / resolution.y()).trunc() as usize;
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let transform = GeoTransform::from_origin(
            extent.xmin(),
            extent.ymax(),
            resolution.x(),
            resolution.y(),
        );

        Ok(Self {
            width,
            height,
            transform,
        })
    }

    /// Dimensions as (rows, cols), matching `ndarray` ordering
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Extent actually covered by the pixels (may be smaller than requested)
    pub fn realized_extent(&self) -> Extent {
        let (min_x, min_y, max_x, max_y) = self.transform.bounds(self.width, self.height);
        Extent {
            xmin: min_x,
            xmax: max_x,
            ymin: min_y,
            ymax: max_y,
        }
    }
}
