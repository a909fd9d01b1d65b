//! Severity classification and spike detection.
//!
//! One global severity scale is shared by all six categories; a value
//! exactly on a boundary belongs to the higher-severity bucket.

use crate::config::SeverityThresholds;
use crate::{Category, CategoryScore, CategorySeverities, SegmentAnalysis, Severity, Spike};

/// Classify one category value against the global scale
pub fn classify(value: f64, thresholds: &SeverityThresholds) -> Severity {
    if value >= thresholds.t3 {
        Severity::Red
    } else if value >= thresholds.t2 {
        Severity::Orange
    } else if value >= thresholds.t1 {
        Severity::Yellow
    } else {
        Severity::Green
    }
}

/// Classify all six categories of one segment
pub fn classify_all(scores: &CategoryScore, thresholds: &SeverityThresholds) -> CategorySeverities {
    let mut severities = CategorySeverities::default();
    for category in Category::ALL {
        severities.set(category, classify(scores.get(category), thresholds));
    }
    severities
}

/// Collect every Orange/Red (segment, category) pair, ordered by segment
/// then category declaration order
pub fn collect_spikes(segments: &[SegmentAnalysis], effective: usize) -> Vec<Spike> {
    let mut spikes = Vec::new();
    for analysis in segments {
        for category in Category::ALL {
            let severity = analysis.severities.get(category);
            if severity.is_spike() {
                spikes.push(Spike {
                    segment: analysis.index,
                    category,
                    severity,
                    value: analysis.categories.get(category),
                    position_pct: (analysis.index * 100 / effective.max(1)) as u8,
                });
            }
        }
    }
    spikes
}
