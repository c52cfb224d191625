//! # seisdem synth
//!
//! Reproducible synthetic DEM fixtures for the spatial parts of the seismic
//! toolkit (station distances, signal migration, amplitude models).
//!
//! ```ignore
//! use seisdem_synth::prelude::*;
//!
//! let params = DemParams::new(Extent::new(0.0, 10.0, 0.0, 10.0)?, Resolution::square(1.0)?)
//!     .with_seed(42);
//! create_dem_with(&params, "fixtures/dem.tif")?;
//! ```

pub mod batch;
pub mod dem;
mod maybe_rayon;

pub use batch::{generate_batch, FixtureJob};
pub use dem::{
    build_dem, create_dem, create_dem_with, smooth_surface, synthesize_elevation, DemParams,
    DEFAULT_NOISE_AMPLITUDE,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::batch::{generate_batch, FixtureJob};
    pub use crate::dem::{build_dem, create_dem, create_dem_with, DemParams};
    pub use seisdem_core::prelude::*;
}
