use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use flood_bbox::filter::{DEFAULT_OUTPUT_NAME, DEFAULT_PROGRESS_INTERVAL};
use flood_bbox::{FilterOptions, Region};

use crate::Args;

/// Optional TOML file; every key can also be given on the command line.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub name: Option<String>,
    pub progress_interval: Option<usize>,
    pub log_exclusions: Option<bool>,
    pub pretty: Option<bool>,
    #[serde(default)]
    pub region: RegionConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct RegionConfig {
    pub min_lon: Option<f64>,
    pub min_lat: Option<f64>,
    pub max_lon: Option<f64>,
    pub max_lat: Option<f64>,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

/// Fully resolved run settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub region: Region,
    pub options: FilterOptions,
    pub pretty: bool,
}

impl Settings {
    /// Merge command line over config file over built-in defaults.
    pub fn resolve(args: &Args, config: Config) -> Result<Self> {
        let input = args
            .input
            .clone()
            .or(config.input)
            .context("No input file given (use --input or `input` in the config file)")?;
        let output = args
            .output
            .clone()
            .or(config.output)
            .context("No output file given (use --output or `output` in the config file)")?;

        let kent = Region::kent();
        let region = Region::new(
            args.min_lon.or(config.region.min_lon).unwrap_or(kent.min_lon()),
            args.min_lat.or(config.region.min_lat).unwrap_or(kent.min_lat()),
            args.max_lon.or(config.region.max_lon).unwrap_or(kent.max_lon()),
            args.max_lat.or(config.region.max_lat).unwrap_or(kent.max_lat()),
        )
        .context("Invalid bounding box")?;

        let options = FilterOptions {
            output_name: args
                .name
                .clone()
                .or(config.name)
                .unwrap_or_else(|| DEFAULT_OUTPUT_NAME.to_string()),
            progress_interval: args
                .progress_interval
                .or(config.progress_interval)
                .unwrap_or(DEFAULT_PROGRESS_INTERVAL),
            log_exclusions: args.log_exclusions || config.log_exclusions.unwrap_or(false),
        };

        Ok(Self {
            input,
            output,
            region,
            options,
            pretty: args.pretty || config.pretty.unwrap_or(false),
        })
    }
}
