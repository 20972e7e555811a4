pub mod api;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod segments;
pub mod signal_processing;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::SegmentationConfig;
pub use error::{HaarSegError, Result};
pub use processing::{HaarSegmenter, SegmentationResult};
pub use signal_processing::BreakpointList;
