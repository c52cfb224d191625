//! Reading and writing georeferenced rasters

mod geokeys;
mod native;

pub use geokeys::{decode as decode_geokeys, encode as encode_geokeys, GeoKeys};
pub use native::{
    output_dir, read_geotiff, read_geotiff_from_buffer, write_geotiff, write_geotiff_to_buffer,
};
