use serde::Serialize;

use crate::config::{LevelConfig, SegmentationConfig};
use crate::error::{HaarSegError, Result, require_len, require_non_empty};
use crate::segments::{Segment, segment_means};
use crate::signal_processing::{
    BreakpointList, adjust_breaks, find_local_peaks, haar_convolve, hard_threshold,
    mad_noise_sigma, unify_levels,
};

/// What happened at one decomposition level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelSummary {
    pub level: u32,
    pub step_half_size: usize,
    pub threshold: f64,
    /// Extrema found before thresholding
    pub candidates: usize,
    /// Extrema that passed the threshold
    pub retained: usize,
}

#[derive(Debug, Clone)]
pub struct SegmentationResult {
    pub breakpoints: BreakpointList,
    pub segments: Vec<Segment>,
    pub levels: Vec<LevelSummary>,
    /// Robust noise estimate, when the threshold policy needed one
    pub noise_sigma: Option<f64>,
}

/// Multi-level Haar segmentation
///
/// Scans the configured levels from fine to coarse. At each level the signal
/// is convolved with a Haar step of half width `2^level`, the extrema of the
/// coefficients are thresholded, and the survivors are merged into the
/// breakpoints accumulated so far using a window of `2^(level-1)`. Earlier
/// (finer) levels act as the base, so their positions win over coarser
/// detections of the same event. The merged breakpoints are then refined and
/// turned into segments.
///
/// The segmenter holds only configuration; each call allocates its working
/// buffers once and reuses them for every level.
pub struct HaarSegmenter {
    config: SegmentationConfig,
}

impl HaarSegmenter {
    pub fn new(config: SegmentationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    /// Segment `signal`, using `weights` for the convolution when given
    pub fn segment(&self, signal: &[f64], weights: Option<&[f64]>) -> Result<SegmentationResult> {
        let n = signal.len();
        require_non_empty(n, "signal")?;
        if let Some(weights) = weights {
            require_len(weights.len(), n, "weight buffer")?;
        }

        let mut coefficients = vec![0.0; n];
        let noise_sigma = if self.config.threshold.needs_noise_estimate() {
            haar_convolve(signal, None, 1, &mut coefficients)?;
            let sigma = mad_noise_sigma(&coefficients);
            log::debug!("Noise sigma estimate: {:?}", sigma);
            sigma
        } else {
            None
        };
        let threshold = self
            .config
            .threshold
            .threshold_for(noise_sigma)
            .ok_or_else(|| HaarSegError::Config("noise estimate unavailable".to_string()))?;

        let mut peaks = BreakpointList::with_capacity(n);
        let mut accumulated = BreakpointList::with_capacity(n);
        let mut joined = BreakpointList::with_capacity(n);
        let mut levels = Vec::new();

        for level in self.config.levels.levels() {
            let step_half_size = LevelConfig::step_half_size(level);
            if step_half_size > n {
                log::debug!(
                    "Stopping at level {}: step {} exceeds signal length {}",
                    level,
                    step_half_size,
                    n
                );
                break;
            }

            haar_convolve(signal, weights, step_half_size, &mut coefficients)?;
            find_local_peaks(&coefficients, &mut peaks);
            let candidates = peaks.len();
            hard_threshold(&coefficients, threshold, &mut peaks)?;

            unify_levels(
                &accumulated,
                &peaks,
                LevelConfig::merge_window(level),
                &mut joined,
            );
            std::mem::swap(&mut accumulated, &mut joined);

            log::debug!(
                "Level {} (step {}): {} candidates, {} above {:.4}, {} breakpoints total",
                level,
                step_half_size,
                candidates,
                peaks.len(),
                threshold,
                accumulated.len()
            );
            levels.push(LevelSummary {
                level,
                step_half_size,
                threshold,
                candidates,
                retained: peaks.len(),
            });
        }

        let breakpoints = if self.config.refine {
            let mut refined = BreakpointList::with_capacity(n);
            adjust_breaks(signal, &accumulated, &mut refined)?;
            refined
        } else {
            accumulated
        };

        let segments = segment_means(signal, &breakpoints)?;
        Ok(SegmentationResult {
            breakpoints,
            segments,
            levels,
            noise_sigma,
        })
    }
}
