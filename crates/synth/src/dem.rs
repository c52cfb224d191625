//! Synthetic DEM generation
//!
//! Builds a smooth `sin(πu)·cos(πv)` dome over normalized grid coordinates,
//! adds uniform per-cell jitter, and writes the result as a georeferenced
//! float32 GeoTIFF. The surface is not meant to look like real terrain; it
//! only has to exercise distance, migration and amplitude code downstream.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seisdem_core::io::{output_dir, write_geotiff};
use seisdem_core::{Error, Extent, GridShape, Raster, Resolution, Result, CRS};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Amplitude of the uniform jitter added to the smooth surface
pub const DEFAULT_NOISE_AMPLITUDE: f64 = 0.1;

fn default_noise_amplitude() -> f64 {
    DEFAULT_NOISE_AMPLITUDE
}

/// Parameters for DEM synthesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemParams {
    /// Requested bounds `[xmin, xmax, ymin, ymax]`
    pub extent: Extent,
    /// Pixel size `(x, y)`, both positive
    pub resolution: Resolution,
    /// Reference system written into the file
    #[serde(default)]
    pub crs: CRS,
    /// Noise seed; `None` draws from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,
    /// Scale of the uniform jitter, `>= 0`
    #[serde(default = "default_noise_amplitude")]
    pub noise_amplitude: f64,
}

impl DemParams {
    /// WGS84, unseeded, default jitter
    pub fn new(extent: Extent, resolution: Resolution) -> Self {
        Self {
            extent,
            resolution,
            crs: CRS::default(),
            seed: None,
            noise_amplitude: DEFAULT_NOISE_AMPLITUDE,
        }
    }

    pub fn with_crs(mut self, crs: CRS) -> Self {
        self.crs = crs;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_noise_amplitude(mut self, amplitude: f64) -> Self {
        self.noise_amplitude = amplitude;
        self
    }

    /// Grid the parameters describe, after checking every parameter
    pub fn grid(&self) -> Result<GridShape> {
        if !self.noise_amplitude.is_finite() || self.noise_amplitude < 0.0 {
            return Err(Error::InvalidParameter {
                name: "noise_amplitude",
                value: self.noise_amplitude.to_string(),
                reason: "must be finite and >= 0".to_string(),
            });
        }
        GridShape::new(&self.extent, &self.resolution)
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Create a DEM fixture at `output_path`.
///
/// Dimensions are `trunc((xmax - xmin) / res_x)` by
/// `trunc((ymax - ymin) / res_y)`; the transform is anchored at
/// `(xmin, ymax)` with pixel size `(res_x, -res_y)`. Noise is unseeded;
/// use [`create_dem_with`] for reproducible output.
///
/// # Errors
/// - [`Error::InvalidExtent`] if `xmin >= xmax` or `ymin >= ymax`
/// - [`Error::InvalidResolution`] if a resolution component is not positive
/// - [`Error::InvalidDimensions`] if the resolution exceeds the extent
/// - [`Error::PathNotFound`] / [`Error::Io`] if the file cannot be written
///
/// Parameter errors are raised before anything is allocated or written.
///
/// # Example
/// ```ignore
/// let path = create_dem(0.0, 10.0, 0.0, 10.0, (1.0, 1.0), "dem.tif", CRS::wgs84())?;
/// ```
pub fn create_dem<P: AsRef<Path>>(
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
    resolution: (f64, f64),
    output_path: P,
    crs: CRS,
) -> Result<PathBuf> {
    let extent = Extent::new(xmin, xmax, ymin, ymax)?;
    let resolution = Resolution::new(resolution.0, resolution.1)?;
    let params = DemParams::new(extent, resolution).with_crs(crs);
    create_dem_with(&params, output_path)
}

/// Create a DEM fixture from explicit parameters
pub fn create_dem_with<P: AsRef<Path>>(params: &DemParams, output_path: P) -> Result<PathBuf> {
    let path = output_path.as_ref();
    params.grid()?;
    output_dir(path)?;

    let dem = build_dem(params)?;
    write_geotiff(&dem, path)?;

    info!(
        path = %path.display(),
        cols = dem.cols(),
        rows = dem.rows(),
        crs = %params.crs,
        "DEM written"
    );
    Ok(path.to_path_buf())
}

/// Synthesize the DEM in memory without touching the filesystem
pub fn build_dem(params: &DemParams) -> Result<Raster<f32>> {
    let grid = params.grid()?;
    let extent = &params.extent;

    debug!(
        xmin = extent.xmin(),
        xmax = extent.xmax(),
        ymin = extent.ymin(),
        ymax = extent.ymax(),
        res_x = params.resolution.x(),
        res_y = params.resolution.y(),
        "DEM extent"
    );
    debug!(cols = grid.width, rows = grid.height, "DEM dimensions");

    let mut rng = params.rng();
    let elevation = synthesize_elevation(grid.width, grid.height, params.noise_amplitude, &mut rng);

    Raster::georeferenced(elevation, &grid, params.crs.clone())
}

/// `n` evenly spaced samples over `[0, 1]`; a single sample sits at 0
fn unit_axis(n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![0.0; n];
    }
    let step = 1.0 / (n - 1) as f64;
    (0..n).map(|i| i as f64 * step).collect()
}

/// Noise-free component `sin(πu)·cos(πv)` with shape `(rows, cols)`.
///
/// `u` runs west to east along columns, `v` north to south along rows.
pub fn smooth_surface(cols: usize, rows: usize) -> Array2<f64> {
    let u: Vec<f64> = unit_axis(cols).into_iter().map(|u| (PI * u).sin()).collect();
    let v: Vec<f64> = unit_axis(rows).into_iter().map(|v| (PI * v).cos()).collect();
    Array2::from_shape_fn((rows, cols), |(r, c)| u[c] * v[r])
}

/// Smooth surface plus `amplitude` times uniform `[0, 1)` noise.
///
/// One sample is drawn per cell in row-major order, so a seeded `rng`
/// gives bit-identical grids.
pub fn synthesize_elevation<R: Rng>(
    cols: usize,
    rows: usize,
    amplitude: f64,
    rng: &mut R,
) -> Array2<f32> {
    let mut elevation = smooth_surface(cols, rows);
    for z in elevation.iter_mut() {
        *z += rng.gen::<f64>() * amplitude;
    }
    elevation.mapv(|z| z as f32)
}
