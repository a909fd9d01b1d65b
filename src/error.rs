//! Error types for beat map analysis

use thiserror::Error;

/// Errors raised at the analysis boundary, before any per-segment work
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// The document contains no analyzable words
    #[error("content contains no analyzable words")]
    EmptyContent,

    /// A configuration value is outside its documented domain
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Fewer word boundaries than requested segments. Recovered at the
    /// segmenter boundary by clamping the segment count; never escapes
    /// `analyze`.
    #[error("content too short for {requested} segments (only {available} words)")]
    InsufficientContent { requested: usize, available: usize },
}
