//! seisdem CLI - synthetic DEM fixtures for seismic spatial analysis

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use seisdem_core::io::read_geotiff;
use seisdem_core::{Extent, Resolution, CRS};
use seisdem_synth::{create_dem_with, generate_batch, DemParams, FixtureJob, DEFAULT_NOISE_AMPLITUDE};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "seisdem")]
#[command(author, version, about = "Synthetic DEM fixtures for seismic spatial analysis", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one synthetic DEM
    Dem {
        /// Output GeoTIFF file
        output: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        xmin: f64,
        #[arg(long, allow_hyphen_values = true)]
        xmax: f64,
        #[arg(long, allow_hyphen_values = true)]
        ymin: f64,
        #[arg(long, allow_hyphen_values = true)]
        ymax: f64,
        /// Pixel size along x
        #[arg(long, default_value = "1.0")]
        res_x: f64,
        /// Pixel size along y
        #[arg(long, default_value = "1.0")]
        res_y: f64,
        /// CRS: EPSG:<code>, a PROJ string or WKT
        #[arg(long, default_value = "EPSG:4326")]
        crs: CRS,
        /// Noise seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Amplitude of the uniform noise
        #[arg(long, default_value_t = DEFAULT_NOISE_AMPLITUDE)]
        amplitude: f64,
    },
    /// Generate every fixture listed in a JSON manifest
    Batch {
        /// JSON array of {"output", "extent", "resolution", "crs"?, "seed"?, "noise_amplitude"?}
        manifest: PathBuf,
    },
    /// Show information about a DEM file
    Info {
        /// Input raster file
        input: PathBuf,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn done(name: &str, path: &std::path::Path, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

fn load_manifest(path: &PathBuf) -> Result<Vec<FixtureJob>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;
    serde_json::from_str(&text).context("Invalid manifest")
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    match cli.command {
        Commands::Dem {
            output,
            xmin,
            xmax,
            ymin,
            ymax,
            res_x,
            res_y,
            crs,
            seed,
            amplitude,
        } => {
            let extent = Extent::new(xmin, xmax, ymin, ymax)?;
            let resolution = Resolution::new(res_x, res_y)?;
            let mut params = DemParams::new(extent, resolution)
                .with_crs(crs)
                .with_noise_amplitude(amplitude);
            if let Some(seed) = seed {
                params = params.with_seed(seed);
            }

            let grid = params.grid()?;
            info!("Grid: {} x {}", grid.width, grid.height);

            let pb = spinner("Generating DEM...");
            let start = Instant::now();
            let path = create_dem_with(&params, &output).context("Failed to create DEM");
            pb.finish_and_clear();
            done("DEM", &path?, start.elapsed());
        }

        Commands::Batch { manifest } => {
            let jobs = load_manifest(&manifest)?;
            let pb = spinner(&format!("Generating {} fixtures...", jobs.len()));
            let start = Instant::now();
            let results = generate_batch(&jobs);
            pb.finish_and_clear();

            let mut failed = 0usize;
            for (job, result) in jobs.iter().zip(results?) {
                match result {
                    Ok(path) => println!("  ok   {}", path.display()),
                    Err(e) => {
                        failed += 1;
                        warn!("{}: {}", job.output.display(), e);
                        println!("  FAIL {}", job.output.display());
                    }
                }
            }
            println!("  Processing time: {:.2?}", start.elapsed());
            if failed > 0 {
                anyhow::bail!("{} of {} fixtures failed", failed, jobs.len());
            }
        }

        Commands::Info { input } => {
            let raster = read_geotiff(&input).context("Failed to read raster")?;
            let (rows, cols) = raster.shape();
            let (min_x, min_y, max_x, max_y) = raster.bounds();
            let (px, py) = raster.transform().pixel_size();
            let stats = raster.statistics();

            println!("File: {}", input.display());
            println!("Dimensions: {} x {} ({} cells)", cols, rows, raster.len());
            println!("Pixel size: ({}, {})", px, py);
            println!(
                "Origin: ({}, {})",
                raster.transform().origin_x,
                raster.transform().origin_y
            );
            println!(
                "Bounds: ({:.6}, {:.6}) - ({:.6}, {:.6})",
                min_x, min_y, max_x, max_y
            );
            match raster.crs() {
                Some(crs) => println!("CRS: {}", crs),
                None => println!("CRS: none"),
            }
            println!("\nStatistics:");
            if let Some(min) = stats.min {
                println!("  Min: {:.4}", min);
            }
            if let Some(max) = stats.max {
                println!("  Max: {:.4}", max);
            }
            if let Some(mean) = stats.mean {
                println!("  Mean: {:.4}", mean);
            }
            println!(
                "  Valid cells: {} ({:.1}%)",
                stats.valid_count,
                100.0 * stats.valid_count as f64 / raster.len() as f64
            );
        }
    }

    Ok(())
}
