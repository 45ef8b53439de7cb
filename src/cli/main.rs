//! Flood-risk bounding-box filter.
//!
//! Loads a feature collection, keeps the features with a vertex inside the
//! bounding box and writes them to a new collection.

mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use flood_bbox::filter::FeaturePass;
use flood_bbox::io::{load_collection, save_collection};

use crate::config::{Config, Settings};

#[derive(Parser, Debug, Clone)]
#[command(name = "flood-bbox")]
#[command(about = "Keep the flood-risk features that have a vertex inside a bounding box")]
pub struct Args {
    /// Input feature collection (.geojson, or .geojson.gz)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output feature collection (.gz to compress)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML config file; command line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Western bound [default: 0.5]
    #[arg(long, allow_negative_numbers = true)]
    min_lon: Option<f64>,

    /// Southern bound [default: 51.0]
    #[arg(long, allow_negative_numbers = true)]
    min_lat: Option<f64>,

    /// Eastern bound [default: 1.7]
    #[arg(long, allow_negative_numbers = true)]
    max_lon: Option<f64>,

    /// Northern bound [default: 51.6]
    #[arg(long, allow_negative_numbers = true)]
    max_lat: Option<f64>,

    /// Name of the output collection [default: flood-risk-kent]
    #[arg(long)]
    name: Option<String>,

    /// Log progress every N features, 0 to disable [default: 1000]
    #[arg(long)]
    progress_interval: Option<usize>,

    /// Warn about each feature dropped for missing, unsupported or malformed geometry
    #[arg(long)]
    log_exclusions: bool,

    /// Show a progress bar while filtering
    #[arg(long)]
    progress_bar: bool,

    /// Indent the output document
    #[arg(long)]
    pretty: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &args.config {
        Some(path) => {
            info!("Config: {}", path.display());
            Config::load_from_file(path)?
        }
        None => Config::default(),
    };
    let settings = Settings::resolve(&args, config)?;

    info!("Flood-risk bounding-box filter");
    info!("Region: {}", settings.region);

    let collection = load_collection(&settings.input)?;

    let mut pass = FeaturePass::new(&settings.region, &settings.options);
    if args.progress_bar {
        let pb = ProgressBar::new(collection.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
                )?
                .progress_chars("#>-"),
        );
        pass = pass.with_progress_bar(pb);
    }

    let (filtered, stats) = pass.run(&collection);
    drop(collection);

    save_collection(&settings.output, &filtered, settings.pretty)?;

    info!(
        "Done: {} of {} features retained ({} excluded)",
        stats.retained,
        stats.processed,
        stats.excluded()
    );

    Ok(())
}
