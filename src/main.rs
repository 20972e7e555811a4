use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use haarseg::config::{SegmentationConfig, ThresholdPolicy};
use haarseg::input::read_signal_file;
use haarseg::output::{OutputFormat, SegmentationReport, create_formatter};
use haarseg::processing::HaarSegmenter;

#[derive(Parser, Debug)]
#[command(name = "haarseg")]
#[command(about = "Haar wavelet breakpoint detection for step signals", long_about = None)]
struct Args {
    /// Signal files to segment (one value per line, optional weight column)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// TOML segmentation configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// First decomposition level
    #[arg(long)]
    start_level: Option<u32>,

    /// Last decomposition level
    #[arg(long)]
    end_level: Option<u32>,

    /// Peak threshold (e.g., "0.8", "4sigma")
    #[arg(short = 't', long)]
    threshold: Option<ThresholdPolicy>,

    /// Use the weight column when present
    #[arg(short = 'w', long)]
    weighted: bool,

    /// Skip breakpoint refinement
    #[arg(long)]
    no_refine: bool,
}

fn build_config(args: &Args) -> Result<SegmentationConfig> {
    let mut config = match args.config {
        Some(ref path) => {
            SegmentationConfig::from_toml_file(path).context("Failed to load config file")?
        }
        None => SegmentationConfig::default(),
    };

    if let Some(level) = args.start_level {
        config.levels.start_level = level;
    }
    if let Some(level) = args.end_level {
        config.levels.end_level = level;
    }
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if args.no_refine {
        config.refine = false;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn segment_file(path: &Path, segmenter: &HaarSegmenter, weighted: bool) -> SegmentationReport {
    let filename = path.display().to_string();
    log::info!("Segmenting {}", filename);

    let data = match read_signal_file(path) {
        Ok(data) => data,
        Err(e) => return SegmentationReport::failed(filename, format!("{:#}", e)),
    };

    let weights = if weighted {
        if data.weights.is_none() {
            log::warn!("{}: no weight column, segmenting unweighted", filename);
        }
        data.weights.as_deref()
    } else {
        None
    };

    match segmenter.segment(&data.values, weights) {
        Ok(result) => {
            log::info!(
                "{}: {} breakpoints in {} samples",
                filename,
                result.breakpoints.len(),
                data.len()
            );
            SegmentationReport::from_result(filename, data.len(), weights.is_some(), &result)
        }
        Err(e) => SegmentationReport::failed(filename, e.to_string()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = build_config(&args)?;
    log::debug!("Configuration: {:?}", config);
    let segmenter = HaarSegmenter::new(config)?;

    let reports: Vec<SegmentationReport> = args
        .files
        .iter()
        .map(|path| segment_file(path, &segmenter, args.weighted))
        .collect();

    let formatter = create_formatter(args.format, args.verbose > 0);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }
    for report in &reports {
        println!("{}", formatter.format(report));
    }

    if reports.iter().all(|report| report.error.is_some()) {
        anyhow::bail!("No file could be segmented");
    }
    Ok(())
}
