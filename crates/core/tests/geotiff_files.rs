//! File-level GeoTIFF tests: atomic writes, overwrite, missing directories.

use ndarray::Array2;
use seisdem_core::io::{read_geotiff, write_geotiff};
use seisdem_core::{Error, GeoTransform, Raster, CRS};

fn dem(rows: usize, cols: usize, fill: f32) -> Raster<f32> {
    let mut raster = Raster::from_array(Array2::from_elem((rows, cols), fill));
    raster.set_transform(GeoTransform::from_origin(500_000.0, 4_200_000.0, 30.0, 30.0));
    raster.set_crs(Some(CRS::utm_wgs84(19, false).unwrap()));
    raster
}

fn entries(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn write_then_read_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dem.tif");

    write_geotiff(&dem(4, 6, 12.5), &path).unwrap();
    let loaded = read_geotiff(&path).unwrap();

    assert_eq!(loaded.shape(), (4, 6));
    assert_eq!(loaded.get(3, 5).unwrap(), 12.5);
    assert_eq!(loaded.transform().origin_x, 500_000.0);
    assert_eq!(loaded.transform().pixel_height, -30.0);
    assert_eq!(loaded.crs().and_then(|c| c.epsg()), Some(32719));

    // no temporary file left next to the output
    assert_eq!(entries(dir.path()), vec!["dem.tif".to_string()]);
}

#[test]
fn overwrite_replaces_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dem.tif");

    write_geotiff(&dem(4, 6, 1.0), &path).unwrap();
    write_geotiff(&dem(2, 3, 2.0), &path).unwrap();

    let loaded = read_geotiff(&path).unwrap();
    assert_eq!(loaded.shape(), (2, 3));
    assert!(loaded.data().iter().all(|&v| v == 2.0));
}

#[test]
fn missing_directory_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("dem.tif");

    let err = write_geotiff(&dem(2, 2, 0.0), &path).unwrap_err();
    assert!(matches!(err, Error::PathNotFound(_)));
    assert!(entries(dir.path()).is_empty());
}

#[test]
fn failed_encode_leaves_nothing_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rotated.tif");

    let mut raster = dem(2, 2, 0.0);
    let mut gt = *raster.transform();
    gt.col_rotation = 0.5;
    raster.set_transform(gt);

    assert!(write_geotiff(&raster, &path).is_err());
    assert!(entries(dir.path()).is_empty());
}
