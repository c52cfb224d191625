//! End-to-end tests: parameters in, GeoTIFF fixture out, read back.

use seisdem_core::io::read_geotiff;
use seisdem_core::{Error, Extent, Resolution, CRS};
use seisdem_synth::{
    create_dem, create_dem_with, generate_batch, smooth_surface, DemParams, FixtureJob,
};
use std::path::Path;

fn dir_is_empty(dir: &Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}

#[test]
fn ten_by_ten_unit_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.tif");

    let returned = create_dem(0.0, 10.0, 0.0, 10.0, (1.0, 1.0), &out, CRS::wgs84()).unwrap();
    assert_eq!(returned, out);

    let dem = read_geotiff(&out).unwrap();
    assert_eq!(dem.shape(), (10, 10));
    assert_eq!(dem.transform().origin_x, 0.0);
    assert_eq!(dem.transform().origin_y, 10.0);
    assert_eq!(dem.transform().pixel_size(), (1.0, -1.0));
    assert_eq!(dem.crs(), Some(&CRS::wgs84()));
    assert_eq!(dem.bounds(), (0.0, 0.0, 10.0, 10.0));
}

#[test]
fn fractional_extent_truncates_width() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.tif");

    create_dem(0.0, 10.5, 0.0, 10.0, (1.0, 1.0), &out, CRS::wgs84()).unwrap();

    let dem = read_geotiff(&out).unwrap();
    assert_eq!(dem.cols(), 10);
    assert_eq!(dem.rows(), 10);
}

#[test]
fn dimensions_follow_truncated_division() {
    let dir = tempfile::tempdir().unwrap();
    let cases = [
        (0.0, 7.9, 0.0, 3.0, (2.0, 0.5)),
        (-120.5, -119.0, 35.0, 36.2, (0.1, 0.25)),
        (300_000.0, 301_000.0, 4_000_000.0, 4_000_950.0, (30.0, 30.0)),
    ];

    for (i, &(xmin, xmax, ymin, ymax, res)) in cases.iter().enumerate() {
        let out = dir.path().join(format!("case{i}.tif"));
        create_dem(xmin, xmax, ymin, ymax, res, &out, CRS::default()).unwrap();

        let dem = read_geotiff(&out).unwrap();
        let width = ((xmax - xmin) / res.0).trunc() as usize;
        let height = ((ymax - ymin) / res.1).trunc() as usize;
        assert_eq!(dem.shape(), (height, width), "case {i}");
        assert_eq!(dem.transform().origin_x, xmin);
        assert_eq!(dem.transform().origin_y, ymax);
        assert_eq!(dem.transform().pixel_size(), (res.0, -res.1));
    }
}

#[test]
fn same_seed_gives_identical_files() {
    let dir = tempfile::tempdir().unwrap();
    let params = DemParams::new(
        Extent::new(0.0, 20.0, 0.0, 15.0).unwrap(),
        Resolution::square(0.5).unwrap(),
    )
    .with_seed(2024);

    let a = create_dem_with(&params, dir.path().join("a.tif")).unwrap();
    let b = create_dem_with(&params, dir.path().join("b.tif")).unwrap();

    assert_eq!(std::fs::read(a).unwrap(), std::fs::read(b).unwrap());
}

#[test]
fn unseeded_runs_share_the_smooth_surface() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.tif");
    let b = dir.path().join("b.tif");
    create_dem(0.0, 12.0, 0.0, 8.0, (1.0, 1.0), &a, CRS::wgs84()).unwrap();
    create_dem(0.0, 12.0, 0.0, 8.0, (1.0, 1.0), &b, CRS::wgs84()).unwrap();

    let a = read_geotiff(&a).unwrap();
    let b = read_geotiff(&b).unwrap();
    let smooth = smooth_surface(12, 8);

    assert_ne!(a.data(), b.data());
    for ((za, zb), s) in a.data().iter().zip(b.data().iter()).zip(smooth.iter()) {
        for z in [*za, *zb] {
            let jitter = z as f64 - s;
            assert!((-1e-6..0.1 + 1e-6).contains(&jitter));
        }
    }
}

#[test]
fn inverted_extent_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.tif");

    let err = create_dem(10.0, 0.0, 0.0, 10.0, (1.0, 1.0), &out, CRS::wgs84()).unwrap_err();
    assert!(matches!(err, Error::InvalidExtent { .. }));

    let err = create_dem(0.0, 10.0, 5.0, 5.0, (1.0, 1.0), &out, CRS::wgs84()).unwrap_err();
    assert!(matches!(err, Error::InvalidExtent { .. }));

    assert!(dir_is_empty(dir.path()));
}

#[test]
fn non_positive_resolution_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.tif");

    for res in [(0.0, 1.0), (1.0, -1.0), (-0.5, -0.5)] {
        let err = create_dem(0.0, 10.0, 0.0, 10.0, res, &out, CRS::wgs84()).unwrap_err();
        assert!(matches!(err, Error::InvalidResolution { .. }), "{res:?}");
    }
    assert!(dir_is_empty(dir.path()));
}

#[test]
fn resolution_coarser_than_extent_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.tif");

    let err = create_dem(0.0, 1.0, 0.0, 10.0, (2.0, 1.0), &out, CRS::wgs84()).unwrap_err();
    assert!(matches!(err, Error::InvalidDimensions { width: 0, height: 10 }));
    assert!(dir_is_empty(dir.path()));
}

#[test]
fn missing_directory_fails_without_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("missing").join("out.tif");

    let err = create_dem(0.0, 10.0, 0.0, 10.0, (1.0, 1.0), &out, CRS::wgs84()).unwrap_err();
    assert!(matches!(err, Error::PathNotFound(_)));
    assert!(dir_is_empty(dir.path()));
}

#[test]
fn projected_crs_is_embedded() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("utm.tif");
    let utm: CRS = "+proj=utm +zone=10 +ellps=WGS84 +datum=WGS84 +units=m +no_defs"
        .parse()
        .unwrap();

    create_dem(0.0, 990.0, 0.0, 990.0, (10.0, 10.0), &out, utm.clone()).unwrap();

    let dem = read_geotiff(&out).unwrap();
    assert_eq!(dem.shape(), (99, 99));
    assert_eq!(dem.crs(), Some(&utm));
}

#[test]
fn batch_writes_every_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let base = DemParams::new(
        Extent::new(0.0, 8.0, 0.0, 8.0).unwrap(),
        Resolution::square(1.0).unwrap(),
    );
    let jobs: Vec<FixtureJob> = (0..4)
        .map(|i| FixtureJob {
            output: dir.path().join(format!("dem_{i}.tif")),
            params: base.clone().with_seed(i),
        })
        .chain(std::iter::once(FixtureJob {
            output: dir.path().join("missing").join("dem.tif"),
            params: base.clone(),
        }))
        .collect();

    let results = generate_batch(&jobs).unwrap();
    assert_eq!(results.len(), 5);
    for (job, result) in jobs.iter().zip(&results).take(4) {
        assert_eq!(result.as_ref().unwrap(), &job.output);
        assert_eq!(read_geotiff(&job.output).unwrap().shape(), (8, 8));
    }
    assert!(matches!(results[4], Err(Error::PathNotFound(_))));
}
