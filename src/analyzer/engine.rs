//! Pipeline orchestration: segment → profile → extract → aggregate →
//! classify → report.
//!
//! Segments are mutually independent once produced: each one reads only
//! the immutable document profile and writes only its own result slot, so
//! extraction may run on the rayon pool with no shared mutable state. The
//! sequential path produces an identical report.

use crate::analyzer::context::DocumentProfile;
use crate::analyzer::{aggregate, severity, vectors};
use crate::config::Config;
use crate::error::AnalysisError;
use crate::report::ReportBuilder;
use crate::segmenter::{self, Segment};
use crate::{BeatMapReport, Confidence, SegmentAnalysis};

/// Analyzer for degradation beat maps
pub struct BeatMapAnalyzer {
    config: Config,
}

impl BeatMapAnalyzer {
    /// Create an analyzer with a segment count and color preference,
    /// defaults elsewhere. Fails on an invalid configuration.
    pub fn new(segments: usize, use_color: bool) -> Result<Self, AnalysisError> {
        Self::from_config(Config {
            segments,
            use_color,
            ..Config::default()
        })
    }

    /// Create an analyzer from a full configuration. Fails on an invalid
    /// configuration, before any content is touched.
    pub fn from_config(config: Config) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Force single-threaded per-segment extraction
    pub fn sequential(mut self) -> Self {
        self.config.parallel = false;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyze a content string into an immutable degradation report
    pub fn analyze(&self, content: &str) -> Result<BeatMapReport, AnalysisError> {
        let segmentation = segmenter::segment(content, self.config.segments)?;
        let profile = DocumentProfile::build(content);

        let analyses: Vec<SegmentAnalysis> = if self.config.parallel {
            use rayon::prelude::*;
            segmentation
                .segments
                .par_iter()
                .map(|seg| self.analyze_segment(seg, &profile))
                .collect()
        } else {
            segmentation
                .segments
                .iter()
                .map(|seg| self.analyze_segment(seg, &profile))
                .collect()
        };

        Ok(ReportBuilder::new(&self.config)
            .segments(segmentation.requested, segmentation.effective)
            .word_count(segmentation.word_count)
            .build(analyses))
    }

    fn analyze_segment(&self, segment: &Segment, profile: &DocumentProfile) -> SegmentAnalysis {
        let vectors = vectors::extract(segment, profile);
        let categories = aggregate::aggregate(&vectors);
        let severities = severity::classify_all(&categories, &self.config.thresholds);
        let degradation = categories.combined();
        let primary_issue = categories.primary();

        SegmentAnalysis {
            index: segment.index,
            start: segment.start,
            end: segment.end,
            word_count: crate::segmenter::tokenize(segment.text).len(),
            vectors,
            categories,
            severities,
            degradation,
            primary_issue,
            confidence: Confidence::from_score(degradation),
        }
    }
}
