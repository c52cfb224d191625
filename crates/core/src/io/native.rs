//! Native GeoTIFF reading/writing on top of the `tiff` crate.
//!
//! Files are single-band, 32-bit float, with the transform stored as
//! `ModelPixelScale` + `ModelTiepoint` and the CRS in the GeoKey directory.

use crate::error::{Error, Result};
use crate::io::geokeys;
use crate::raster::{GeoTransform, Raster, RasterElement};
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::Gray32Float;
use tiff::encoder::TiffEncoder;
use tiff::tags::Tag;
use tiff::ColorType;
use tracing::debug;

/// Read a single-band float32 GeoTIFF
pub fn read_geotiff<P: AsRef<Path>>(path: P) -> Result<Raster<f32>> {
    let file = File::open(path.as_ref())?;
    decode_geotiff(BufReader::new(file))
}

/// Read a single-band float32 GeoTIFF from memory
pub fn read_geotiff_from_buffer(data: &[u8]) -> Result<Raster<f32>> {
    decode_geotiff(Cursor::new(data))
}

fn decode_geotiff<R: Read + Seek>(reader: R) -> Result<Raster<f32>> {
    let mut decoder = Decoder::new(reader)?;

    let (width, height) = decoder.dimensions()?;
    match decoder.colortype()? {
        ColorType::Gray(32) => {}
        other => {
            return Err(Error::UnsupportedDataType(format!(
                "expected single-band 32-bit samples, found {:?}",
                other
            )))
        }
    }

    let data = match decoder.read_image()? {
        DecodingResult::F32(buf) => buf,
        _ => {
            return Err(Error::UnsupportedDataType(
                "expected IEEE float samples".to_string(),
            ))
        }
    };

    let mut raster = Raster::from_vec(data, height as usize, width as usize)?;

    if let Some(transform) = read_geotransform(&mut decoder) {
        raster.set_transform(transform);
    }

    if let Ok(directory) = decoder.get_tag_u16_vec(Tag::GeoKeyDirectoryTag) {
        let ascii = decoder.get_tag_ascii_string(Tag::GeoAsciiParamsTag).ok();
        raster.set_crs(geokeys::decode(&directory, ascii.as_deref()));
    }

    Ok(raster)
}

/// Transform from `ModelPixelScale` + `ModelTiepoint`, if both are present
fn read_geotransform<R: Read + Seek>(decoder: &mut Decoder<R>) -> Option<GeoTransform> {
    let scale = decoder.get_tag_f64_vec(Tag::ModelPixelScaleTag).ok()?;
    let tiepoint = decoder.get_tag_f64_vec(Tag::ModelTiepointTag).ok()?;

    if scale.len() < 2 || tiepoint.len() < 6 {
        return None;
    }

    // tiepoint: [I, J, K, X, Y, Z] ties raster (I, J) to world (X, Y)
    let origin_x = tiepoint[3] - tiepoint[0] * scale[0];
    let origin_y = tiepoint[4] + tiepoint[1] * scale[1];
    Some(GeoTransform::new(origin_x, origin_y, scale[0], -scale[1]))
}

/// Directory a file at `path` would be created in, which must exist.
///
/// A bare file name resolves to the current directory.
pub fn output_dir(path: &Path) -> Result<&Path> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.is_dir() {
        return Err(Error::PathNotFound(path.to_path_buf()));
    }
    Ok(dir)
}

/// Write a raster as a float32 GeoTIFF.
///
/// The file is encoded into a temporary sibling and renamed over `path`
/// only once fully written, so a failure never leaves a partial file.
/// The destination directory must already exist.
pub fn write_geotiff<T, P>(raster: &Raster<T>, path: P) -> Result<()>
where
    T: RasterElement,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let dir = output_dir(path)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".seisdem-")
        .suffix(".tif.part")
        .tempfile_in(dir)?;

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        encode_geotiff(raster, &mut writer)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    debug!(path = %path.display(), "GeoTIFF written");
    Ok(())
}

/// Encode a raster as a float32 GeoTIFF in memory
pub fn write_geotiff_to_buffer<T: RasterElement>(raster: &Raster<T>) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    encode_geotiff(raster, &mut buf)?;
    Ok(buf.into_inner())
}

fn encode_geotiff<T, W>(raster: &Raster<T>, writer: W) -> Result<()>
where
    T: RasterElement,
    W: Write + Seek,
{
    let (rows, cols) = raster.shape();
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }

    let gt = raster.transform();
    if !gt.is_north_up() {
        return Err(Error::Tiff(
            "only north-up transforms can be stored as pixel scale + tiepoint".to_string(),
        ));
    }

    let samples: Vec<f32> = raster
        .data()
        .iter()
        .map(|v| v.to_f32().unwrap_or(f32::NAN))
        .collect();

    let mut encoder = TiffEncoder::new(writer)?;
    let mut image = encoder.new_image::<Gray32Float>(cols as u32, rows as u32)?;

    let scale = [gt.pixel_width, -gt.pixel_height, 0.0];
    image
        .encoder()
        .write_tag(Tag::ModelPixelScaleTag, &scale[..])?;

    let tiepoint = [0.0, 0.0, 0.0, gt.origin_x, gt.origin_y, 0.0];
    image
        .encoder()
        .write_tag(Tag::ModelTiepointTag, &tiepoint[..])?;

    if let Some(crs) = raster.crs() {
        let keys = geokeys::encode(crs);
        image
            .encoder()
            .write_tag(Tag::GeoKeyDirectoryTag, keys.directory.as_slice())?;
        if let Some(ascii) = &keys.ascii {
            image
                .encoder()
                .write_tag(Tag::GeoAsciiParamsTag, ascii.as_str())?;
        }
    }

    image.write_data(&samples)?;
    Ok(())
}
