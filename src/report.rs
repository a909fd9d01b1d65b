//! Report assembly: peaks, dominant issue, spikes, executive summary.
//!
//! The report is purely derived from the ordered per-segment scores:
//! rebuilding it from the same scores always yields the same result.

use crate::analyzer::severity;
use crate::config::Config;
use crate::{BeatMapReport, Category, CategoryPeak, ExecutiveSummary, SegmentAnalysis, Spike};

/// Recommended action for each dominant issue
pub fn recommended_action(category: Category) -> &'static str {
    match category {
        Category::IntentDecay => "Apply focused editing to restore original intent",
        Category::Repetition => "Remove redundant content and vary phrasing",
        Category::Vagueness => "Add specific details and concrete examples",
        Category::ConfidenceInflation => "Moderate certainty claims with appropriate caveats",
        Category::VoiceDegradation => "Restore consistent tone and perspective",
        Category::EntropyCollapse => "Restructure content to maintain complexity",
    }
}

/// Builder assembling a [`BeatMapReport`] from per-segment analyses
pub struct ReportBuilder<'a> {
    config: &'a Config,
    requested: usize,
    effective: usize,
    word_count: usize,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            requested: 0,
            effective: 0,
            word_count: 0,
        }
    }

    pub fn segments(mut self, requested: usize, effective: usize) -> Self {
        self.requested = requested;
        self.effective = effective;
        self
    }

    pub fn word_count(mut self, word_count: usize) -> Self {
        self.word_count = word_count;
        self
    }

    pub fn build(self, segments: Vec<SegmentAnalysis>) -> BeatMapReport {
        let peaks = peaks(&segments);
        let spikes = severity::collect_spikes(&segments, self.effective.max(1));
        let dominant_issue = dominant(&segments, &peaks);
        let average_degradation = if segments.is_empty() {
            0.0
        } else {
            segments.iter().map(|s| s.degradation).sum::<f64>() / segments.len() as f64
        };
        let summary = executive_summary(
            self.config,
            &segments,
            &peaks,
            &spikes,
            dominant_issue,
            average_degradation,
            self.effective.max(1),
        );

        BeatMapReport {
            requested_segments: self.requested,
            effective_segments: self.effective,
            word_count: self.word_count,
            use_color: self.config.use_color,
            thresholds: self.config.thresholds,
            segments,
            peaks,
            dominant_issue,
            average_degradation,
            spikes,
            summary,
        }
    }
}

/// Per-category peak segment and value; the earliest segment wins ties
fn peaks(segments: &[SegmentAnalysis]) -> Vec<CategoryPeak> {
    Category::ALL
        .iter()
        .map(|&category| {
            let mut peak = CategoryPeak {
                category,
                segment: 0,
                value: 0.0,
            };
            for analysis in segments {
                let value = analysis.categories.get(category);
                if value > peak.value {
                    peak.segment = analysis.index;
                    peak.value = value;
                }
            }
            peak
        })
        .collect()
}

/// Dominant issue: most Orange/Red segments; ties broken by highest
/// single peak value, then category declaration order
fn dominant(segments: &[SegmentAnalysis], peaks: &[CategoryPeak]) -> Category {
    let mut best = Category::Repetition;
    let mut best_count = 0usize;
    let mut best_peak = -1.0f64;

    for (i, &category) in Category::ALL.iter().enumerate() {
        let count = segments
            .iter()
            .filter(|s| s.severities.get(category).is_spike())
            .count();
        let peak = peaks[i].value;
        if count > best_count || (count == best_count && peak > best_peak) {
            best = category;
            best_count = count;
            best_peak = peak;
        }
    }
    best
}

#[allow(clippy::too_many_arguments)]
fn executive_summary(
    config: &Config,
    segments: &[SegmentAnalysis],
    peaks: &[CategoryPeak],
    spikes: &[Spike],
    dominant: Category,
    average: f64,
    effective: usize,
) -> ExecutiveSummary {
    let peak = peaks
        .iter()
        .find(|p| p.category == dominant)
        .expect("peaks cover every category");
    let peak_pct = peak.segment * 100 / effective;

    let finding = if peak.value >= config.thresholds.t2 {
        let place = if peak_pct < 30 {
            "in early sections".to_string()
        } else if peak_pct > 70 {
            "in final sections".to_string()
        } else {
            format!("at the {peak_pct}% mark")
        };
        format!("{dominant} spikes {place}")
    } else {
        format!("Moderate {dominant} detected throughout")
    };

    let mut summary = format!(
        "Analysis of {} segments shows {:.0}% average degradation. Primary concern: {}.",
        segments.len(),
        average * 100.0,
        dominant
    );
    if !spikes.is_empty() {
        let mut positions: Vec<u8> = Vec::new();
        for spike in spikes {
            if !positions.contains(&spike.position_pct) {
                positions.push(spike.position_pct);
            }
        }
        let listed = positions
            .iter()
            .map(|p| format!("{p}%"))
            .collect::<Vec<_>>()
            .join(", ");
        summary.push_str(&format!(
            " Detected {} degradation spike(s) at {}.",
            spikes.len(),
            listed
        ));
    }

    ExecutiveSummary {
        summary,
        finding,
        action: recommended_action(dominant).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::severity::classify_all;
    use crate::config::SeverityThresholds;
    use crate::{CategoryScore, Confidence, VectorScore};

    fn analysis(index: usize, category: Category, value: f64) -> SegmentAnalysis {
        let mut categories = CategoryScore::default();
        categories.set(category, value);
        let severities = classify_all(&categories, &SeverityThresholds::default());
        let degradation = categories.combined();
        SegmentAnalysis {
            index,
            start: index * 10,
            end: index * 10 + 10,
            word_count: 2,
            vectors: VectorScore::default(),
            categories,
            severities,
            degradation,
            primary_issue: category,
            confidence: Confidence::from_score(degradation),
        }
    }

    fn build(segments: Vec<SegmentAnalysis>) -> BeatMapReport {
        let config = Config::default();
        let n = segments.len();
        ReportBuilder::new(&config)
            .segments(n, n)
            .word_count(n * 2)
            .build(segments)
    }

    #[test]
    fn dominant_issue_follows_spike_count() {
        let report = build(vec![
            analysis(0, Category::Vagueness, 0.8),
            analysis(1, Category::Vagueness, 0.8),
            analysis(2, Category::Repetition, 0.9),
        ]);
        assert_eq!(report.dominant_issue, Category::Vagueness);
    }

    #[test]
    fn spike_count_ties_break_on_peak_value() {
        let report = build(vec![
            analysis(0, Category::Vagueness, 0.8),
            analysis(1, Category::Repetition, 0.9),
        ]);
        assert_eq!(report.dominant_issue, Category::Repetition);
    }

    #[test]
    fn peaks_keep_the_earliest_segment_on_ties() {
        let report = build(vec![
            analysis(0, Category::EntropyCollapse, 0.6),
            analysis(1, Category::EntropyCollapse, 0.6),
        ]);
        let peak = report.peak(Category::EntropyCollapse);
        assert_eq!(peak.segment, 0);
        assert!((peak.value - 0.6).abs() < 1e-9);
    }

    #[test]
    fn spikes_record_orange_and_red_only() {
        let report = build(vec![
            analysis(0, Category::Repetition, 0.3),
            analysis(1, Category::Repetition, 0.55),
            analysis(2, Category::Repetition, 0.8),
        ]);
        assert_eq!(report.spikes.len(), 2);
        assert_eq!(report.spikes[0].segment, 1);
        assert_eq!(report.spikes[1].segment, 2);
        assert_eq!(report.spikes[1].severity, crate::Severity::Red);
    }

    #[test]
    fn finding_names_early_sections() {
        let mut segments = vec![analysis(0, Category::Repetition, 0.9)];
        segments.extend((1..10).map(|i| analysis(i, Category::Repetition, 0.1)));
        let report = build(segments);
        assert_eq!(report.summary.finding, "Repetition spikes in early sections");
    }

    #[test]
    fn finding_names_final_sections() {
        let mut segments: Vec<_> = (0..9)
            .map(|i| analysis(i, Category::Vagueness, 0.1))
            .collect();
        segments.push(analysis(9, Category::Vagueness, 0.9));
        let report = build(segments);
        assert_eq!(report.summary.finding, "Vagueness spikes in final sections");
    }

    #[test]
    fn finding_names_percentage_mark_in_the_middle() {
        let mut segments: Vec<_> = (0..10)
            .map(|i| analysis(i, Category::IntentDecay, 0.1))
            .collect();
        segments[5] = analysis(5, Category::IntentDecay, 0.9);
        let report = build(segments);
        assert_eq!(
            report.summary.finding,
            "Intent Decay spikes at the 50% mark"
        );
    }

    #[test]
    fn low_peak_reads_as_moderate() {
        let report = build(vec![
            analysis(0, Category::Vagueness, 0.3),
            analysis(1, Category::Vagueness, 0.4),
        ]);
        assert_eq!(
            report.summary.finding,
            "Moderate Vagueness detected throughout"
        );
        assert!(report.spikes.is_empty());
    }

    #[test]
    fn action_comes_from_the_lookup_table() {
        let report = build(vec![analysis(0, Category::ConfidenceInflation, 0.9)]);
        assert_eq!(
            report.summary.action,
            "Moderate certainty claims with appropriate caveats"
        );
    }

    #[test]
    fn summary_counts_spikes_with_positions() {
        let report = build(vec![
            analysis(0, Category::Repetition, 0.8),
            analysis(1, Category::Repetition, 0.1),
            analysis(2, Category::Repetition, 0.8),
            analysis(3, Category::Repetition, 0.1),
        ]);
        assert!(report.summary.summary.contains("2 degradation spike(s)"));
        assert!(report.summary.summary.contains("0%, 50%"));
    }

    #[test]
    fn rebuilding_from_the_same_scores_is_idempotent() {
        let segments = vec![
            analysis(0, Category::Repetition, 0.8),
            analysis(1, Category::Vagueness, 0.4),
        ];
        let a = build(segments.clone());
        let b = build(segments);
        assert_eq!(a, b);
    }
}
