//! Configuration schema for beatmap

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};

fn default_segments() -> usize {
    20
}

fn default_use_color() -> bool {
    true
}

fn default_width() -> usize {
    70
}

fn default_parallel() -> bool {
    true
}

/// Global severity scale shared by all six categories.
///
/// The partition of [0,1] is contiguous and exhaustive:
/// Green [0, t1), Yellow [t1, t2), Orange [t2, t3), Red [t3, 1].
/// A value exactly on a boundary belongs to the higher bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SeverityThresholds {
    pub t1: f64,
    pub t2: f64,
    pub t3: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            t1: 0.25,
            t2: 0.50,
            t3: 0.75,
        }
    }
}

impl SeverityThresholds {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let ordered = 0.0 < self.t1 && self.t1 < self.t2 && self.t2 < self.t3 && self.t3 < 1.0;
        if !ordered {
            return Err(AnalysisError::InvalidConfiguration(format!(
                "severity thresholds must be strictly increasing within (0, 1), got ({}, {}, {})",
                self.t1, self.t2, self.t3
            )));
        }
        Ok(())
    }
}

/// Analysis and rendering options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Target segment count (clamped down when content is short)
    #[serde(default = "default_segments")]
    pub segments: usize,
    /// Color the ASCII timeline (shading characters always carry severity)
    #[serde(default = "default_use_color")]
    pub use_color: bool,
    /// Character width of the ASCII beat map
    #[serde(default = "default_width")]
    pub width: usize,
    /// Severity scale; one global scale for all categories
    #[serde(default)]
    pub thresholds: SeverityThresholds,
    /// Run per-segment extraction on the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            segments: default_segments(),
            use_color: default_use_color(),
            width: default_width(),
            thresholds: SeverityThresholds::default(),
            parallel: default_parallel(),
        }
    }
}

impl Config {
    /// Check every value against its documented domain. Called before any
    /// per-segment work so a bad configuration can never produce a partial
    /// report.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.segments == 0 {
            return Err(AnalysisError::InvalidConfiguration(
                "segment count must be at least 1".to_string(),
            ));
        }
        if self.width == 0 {
            return Err(AnalysisError::InvalidConfiguration(
                "width must be at least 1".to_string(),
            ));
        }
        self.thresholds.validate()
    }
}
