pub mod config;
pub mod error;
pub mod palettes;
pub mod recolor;
pub mod regions;
pub mod texture;

#[cfg(test)]
mod test_support;

use clap::Parser;
use config::FacepaintConfig;
use error::AppError;
use std::path::PathBuf;
use std::process::ExitCode;
use texture::{recolor_all, RecolorMode};

/// Recolor each theme's base color texture so its six faces take the
/// theme's palette, in reading order.
#[derive(Debug, Parser)]
#[command(name = "facepaint", version, about)]
pub struct Cli {
    /// Directory holding Rubik_baseColor_<name>.png textures
    #[arg(long, value_name = "DIR")]
    pub texture_dir: Option<PathBuf>,

    /// JSON settings file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only process this palette; repeat for several (default: all)
    #[arg(long = "palette", value_name = "NAME")]
    pub palettes: Vec<String>,

    /// Segment and check face counts without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// RGB distance from the background that counts as foreground
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Smallest region, in pixels, that counts as a face
    #[arg(long)]
    pub min_size: Option<usize>,

    /// Side of the top-left square sampled for the background
    #[arg(long)]
    pub sample_window: Option<u32>,
}

impl Cli {
    /// Config file (or defaults) with command-line flags layered on top.
    pub fn settings(&self) -> Result<FacepaintConfig, AppError> {
        let mut settings = match &self.config {
            Some(path) => FacepaintConfig::load(path)?,
            None => FacepaintConfig::default(),
        };

        if let Some(dir) = &self.texture_dir {
            settings.texture_dir = dir.clone();
        }
        if let Some(threshold) = self.threshold {
            settings.segmentation.distance_threshold = threshold;
        }
        if let Some(min_size) = self.min_size {
            settings.segmentation.min_component_size = min_size;
        }
        if let Some(window) = self.sample_window {
            settings.segmentation.sample_window = window;
        }

        Ok(settings)
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
}

pub fn run_batch(cli: &Cli) -> Result<BatchSummary, AppError> {
    let settings = cli.settings()?;
    let available = palettes::with_overrides(&settings.palettes);
    let selected = palettes::select(&available, &cli.palettes)?;
    let mode = if cli.dry_run {
        RecolorMode::DryRun
    } else {
        RecolorMode::Write
    };

    log::info!(
        "Processing {} textures in {} ({:?}, threshold {}, min size {})",
        selected.len(),
        settings.texture_dir.display(),
        mode,
        settings.segmentation.distance_threshold,
        settings.segmentation.min_component_size
    );

    let mut summary = BatchSummary::default();
    for outcome in recolor_all(
        &settings.texture_dir,
        &selected,
        &settings.segmentation,
        mode,
    ) {
        match outcome.result {
            Ok(_) => summary.succeeded.push(outcome.name),
            Err(_) => summary.failed.push(outcome.name),
        }
    }

    Ok(summary)
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    match run_batch(&cli) {
        Ok(summary) if summary.failed.is_empty() => {
            log::info!("All {} textures processed", summary.succeeded.len());
            ExitCode::SUCCESS
        }
        Ok(summary) => {
            log::error!(
                "{} of {} textures failed: {}",
                summary.failed.len(),
                summary.failed.len() + summary.succeeded.len(),
                summary.failed.join(", ")
            );
            ExitCode::FAILURE
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
