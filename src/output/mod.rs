mod csv;
mod json;
mod text;

use rolling_stats::Stats;
use serde::Serialize;

use crate::processing::{LevelSummary, SegmentationResult};
use crate::segments::Segment;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl StatsSummary {
    pub fn from_stats(stats: &Stats<f64>) -> Option<Self> {
        if stats.count == 0 {
            return None;
        }
        Some(Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        })
    }
}

/// Segmentation outcome of one input file
#[derive(Debug, Clone, Serialize)]
pub struct SegmentationReport {
    pub filename: String,
    pub sample_count: usize,
    pub weighted: bool,
    pub noise_sigma: Option<f64>,
    pub breakpoints: Vec<usize>,
    pub segments: Vec<Segment>,
    pub levels: Vec<LevelSummary>,
    pub segment_length: Option<StatsSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SegmentationReport {
    pub fn from_result(
        filename: String,
        sample_count: usize,
        weighted: bool,
        result: &SegmentationResult,
    ) -> Self {
        let mut lengths: Stats<f64> = Stats::new();
        for segment in &result.segments {
            lengths.update(segment.len() as f64);
        }
        Self {
            filename,
            sample_count,
            weighted,
            noise_sigma: result.noise_sigma,
            breakpoints: result.breakpoints.to_vec(),
            segments: result.segments.clone(),
            levels: result.levels.clone(),
            segment_length: StatsSummary::from_stats(&lengths),
            error: None,
        }
    }

    pub fn failed(filename: String, error: String) -> Self {
        Self {
            filename,
            sample_count: 0,
            weighted: false,
            noise_sigma: None,
            breakpoints: Vec::new(),
            segments: Vec::new(),
            levels: Vec::new(),
            segment_length: None,
            error: Some(error),
        }
    }
}

pub trait Formatter: Send {
    fn format(&self, report: &SegmentationReport) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}
