//! CLI for fiberfinder.

use anyhow::Result;
use clap::Parser;
use fiberfinder_core::config::{self, FiberConfig};
use fiberfinder_core::http::CurlClient;
use fiberfinder_core::pipeline::{self, RunOptions};
use std::path::PathBuf;

/// Make a map of apartments & condos in Austin with Google Fiber.
#[derive(Debug, Parser)]
#[command(name = "fiberfinder", version)]
#[command(
    about = "Make a map of apartments & condos in Austin with Google Fiber",
    long_about = None
)]
pub struct Cli {
    /// Destination for output GeoJSON [default: atx_fiber_apts.json, or `output` from config].
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Metadata URL [default: the Google Fiber Austin property-manager object, or `metadata_url` from config].
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Overwrite the output GeoJSON if it already exists.
    #[arg(long)]
    pub overwrite: bool,

    /// Read configuration from this file instead of ~/.config/fiberfinder/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Log to stderr instead of ~/.local/state/fiberfinder/fiberfinder.log.
    #[arg(long)]
    pub log_stderr: bool,
}

impl Cli {
    fn load_config(&self) -> Result<FiberConfig> {
        match &self.config {
            Some(path) => config::load_from(path),
            None => config::load_or_init(),
        }
    }

    /// Merge flags over config; flags win.
    pub fn run_options(&self, cfg: &FiberConfig) -> RunOptions {
        RunOptions {
            metadata_url: self
                .url
                .clone()
                .unwrap_or_else(|| cfg.metadata_url.clone()),
            output: self.output.clone().unwrap_or_else(|| cfg.output.clone()),
            overwrite: self.overwrite,
        }
    }

    pub fn run(self) -> Result<()> {
        let cfg = self.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let opts = self.run_options(&cfg);
        let client = CurlClient::from_config(&cfg);
        let summary = pipeline::run(&client, &opts)?;

        println!(
            "{} ready of {} records -> {}",
            summary.ready_records,
            summary.total_records,
            summary.output.display()
        );
        Ok(())
    }
}
