//! Configuration for the multi-level segmentation driver.
//!
//! Every field has a default, so a TOML file only needs the values it
//! changes:
//!
//! ```toml
//! threshold = "3.5sigma"
//! refine = true
//!
//! [levels]
//! start_level = 1
//! end_level = 6
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{HaarSegError, Result};

/// Highest decomposition level accepted; level `l` uses a step of `2^l`
pub const MAX_LEVEL: u32 = 30;

/// Coefficient magnitude a peak must reach to be kept
///
/// # Parsing formats
/// - `0.8` - fixed threshold in signal units
/// - `4sigma` or `4σ` - multiple of the estimated noise standard deviation
///
/// # Example
/// ```
/// use haarseg::config::ThresholdPolicy;
///
/// let policy: ThresholdPolicy = "3.5sigma".parse().unwrap();
/// assert_eq!(policy, ThresholdPolicy::NoiseScaled { factor: 3.5 });
/// assert_eq!(policy.threshold_for(Some(2.0)), Some(7.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub enum ThresholdPolicy {
    /// Same threshold at every level
    Fixed { value: f64 },
    /// `factor` times the robust noise estimate of the signal
    NoiseScaled { factor: f64 },
}

impl ThresholdPolicy {
    /// Resolve the threshold given the noise estimate, if one is needed
    pub fn threshold_for(&self, noise_sigma: Option<f64>) -> Option<f64> {
        match *self {
            Self::Fixed { value } => Some(value),
            Self::NoiseScaled { factor } => noise_sigma.map(|sigma| factor * sigma),
        }
    }

    /// Whether the noise level has to be estimated before thresholding
    pub fn needs_noise_estimate(&self) -> bool {
        matches!(self, Self::NoiseScaled { .. })
    }

    fn magnitude(&self) -> f64 {
        match *self {
            Self::Fixed { value } => value,
            Self::NoiseScaled { factor } => factor,
        }
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::NoiseScaled { factor: 4.0 }
    }
}

impl fmt::Display for ThresholdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed { value } => write!(f, "{value}"),
            Self::NoiseScaled { factor } => write!(f, "{factor}sigma"),
        }
    }
}

impl FromStr for ThresholdPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(num) = s.strip_suffix("sigma").or_else(|| s.strip_suffix("σ")) {
            let factor: f64 = num
                .trim()
                .parse()
                .map_err(|_| format!("invalid sigma factor: {}", s))?;
            if !(factor.is_finite() && factor > 0.0) {
                return Err("sigma factor must be positive".to_string());
            }
            return Ok(Self::NoiseScaled { factor });
        }

        let value: f64 = s.parse().map_err(|_| format!("invalid threshold: {}", s))?;
        if !(value.is_finite() && value > 0.0) {
            return Err("threshold must be positive".to_string());
        }
        Ok(Self::Fixed { value })
    }
}

impl TryFrom<String> for ThresholdPolicy {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

/// Range of decomposition levels to scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Finest level (step half size `2^start_level`)
    pub start_level: u32,
    /// Coarsest level, inclusive
    pub end_level: u32,
}

impl LevelConfig {
    /// Step half size of the Haar wavelet at `level`
    pub fn step_half_size(level: u32) -> usize {
        1 << level
    }

    /// Tolerance used when merging `level` into the coarser levels
    pub fn merge_window(level: u32) -> usize {
        1 << level.saturating_sub(1)
    }

    pub fn levels(&self) -> std::ops::RangeInclusive<u32> {
        self.start_level..=self.end_level
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            start_level: 1,
            end_level: 5,
        }
    }
}

/// Multi-level segmentation configuration
///
/// # Example
/// ```
/// use haarseg::config::SegmentationConfig;
///
/// let mut config = SegmentationConfig::default();
/// config.levels.end_level = 3;
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Decomposition levels to scan
    pub levels: LevelConfig,
    /// Peak threshold policy
    pub threshold: ThresholdPolicy,
    /// Apply one-sample breakpoint refinement after merging
    pub refine: bool,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            levels: LevelConfig::default(),
            threshold: ThresholdPolicy::default(),
            refine: true,
        }
    }
}

impl SegmentationConfig {
    /// Parse and validate a TOML configuration
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| HaarSegError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| HaarSegError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let LevelConfig {
            start_level,
            end_level,
        } = self.levels;
        if start_level == 0 {
            return Err(HaarSegError::Config(
                "start_level must be at least 1".to_string(),
            ));
        }
        if start_level > end_level {
            return Err(HaarSegError::Config(format!(
                "start_level {start_level} exceeds end_level {end_level}"
            )));
        }
        if end_level > MAX_LEVEL {
            return Err(HaarSegError::Config(format!(
                "end_level {end_level} exceeds maximum {MAX_LEVEL}"
            )));
        }
        let magnitude = self.threshold.magnitude();
        if !(magnitude.is_finite() && magnitude > 0.0) {
            return Err(HaarSegError::Config(format!(
                "threshold {} must be positive",
                self.threshold
            )));
        }
        Ok(())
    }
}
