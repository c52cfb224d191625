//! Generating several fixtures in one go

use crate::dem::{create_dem_with, DemParams};
use crate::maybe_rayon::*;
use seisdem_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::info;

/// One fixture to generate: where to write it and how to build it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureJob {
    pub output: PathBuf,
    #[serde(flatten)]
    pub params: DemParams,
}

/// Generate every job, in parallel when the `parallel` feature is enabled.
///
/// Jobs share no state, so each one succeeds or fails on its own and the
/// results come back in job order. Two jobs naming the same output path
/// would race on the rename, so that is rejected before anything runs.
pub fn generate_batch(jobs: &[FixtureJob]) -> Result<Vec<Result<PathBuf>>> {
    let mut seen = HashSet::with_capacity(jobs.len());
    for job in jobs {
        if !seen.insert(&job.output) {
            return Err(Error::DuplicateOutput(job.output.clone()));
        }
    }

    info!(jobs = jobs.len(), "Generating DEM fixtures");

    let results: Vec<Result<PathBuf>> = jobs
        .into_par_iter()
        .map(|job| create_dem_with(&job.params, &job.output))
        .collect();

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seisdem_core::{Extent, Resolution};

    fn job(output: &str) -> FixtureJob {
        FixtureJob {
            output: PathBuf::from(output),
            params: DemParams::new(
                Extent::new(0.0, 4.0, 0.0, 4.0).unwrap(),
                Resolution::square(1.0).unwrap(),
            ),
        }
    }

    #[test]
    fn test_duplicate_outputs_rejected() {
        let jobs = vec![job("a.tif"), job("b.tif"), job("a.tif")];
        let err = generate_batch(&jobs).unwrap_err();
        assert!(matches!(err, Error::DuplicateOutput(p) if p == PathBuf::from("a.tif")));
    }

    #[test]
    fn test_manifest_entry_json() {
        let job: FixtureJob = serde_json::from_str(
            r#"{
                "output": "fixtures/dem.tif",
                "extent": [0.0, 10.0, 0.0, 10.0],
                "resolution": [1.0, 1.0],
                "crs": "EPSG:32633",
                "seed": 42
            }"#,
        )
        .unwrap();
        assert_eq!(job.output, PathBuf::from("fixtures/dem.tif"));
        assert_eq!(job.params.crs.epsg(), Some(32633));
        assert_eq!(job.params.seed, Some(42));
    }
}
