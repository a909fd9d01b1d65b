//! ASCII beat map renderer.
//!
//! Emits a fixed-width box-drawn timeline. Severity is always carried by
//! the shading vocabulary `░ ▒ ▓ █` (Green, Yellow, Orange, Red), so the
//! map stays readable with color disabled; with color enabled the same
//! characters are wrapped in explicit ANSI codes. Output is a pure
//! function of the report: identical reports render byte-identically.

use crate::analyzer::severity::classify;
use crate::{BeatMapReport, Category, Severity};

const RESET: &str = "\x1b[0m";

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Green => "\x1b[92m",
        Severity::Yellow => "\x1b[93m",
        Severity::Orange => "\x1b[38;5;208m",
        Severity::Red => "\x1b[91m",
    }
}

/// A rendered fragment tracked both with and without color codes, so box
/// padding can be computed from visible length alone
#[derive(Default)]
struct Fragment {
    plain: String,
    colored: String,
}

impl Fragment {
    fn push_plain(&mut self, text: &str) {
        self.plain.push_str(text);
        self.colored.push_str(text);
    }

    fn push_severity(&mut self, text: &str, severity: Severity, use_color: bool) {
        self.plain.push_str(text);
        if use_color {
            self.colored.push_str(severity_color(severity));
            self.colored.push_str(text);
            self.colored.push_str(RESET);
        } else {
            self.colored.push_str(text);
        }
    }

    fn visible_len(&self) -> usize {
        self.plain.chars().count()
    }
}

/// Renderer for the terminal beat map
pub struct AsciiReporter {
    width: usize,
    /// Overrides the report's color preference when set
    use_color: Option<bool>,
}

impl AsciiReporter {
    pub fn new() -> Self {
        Self {
            width: 70,
            use_color: None,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn without_colors(mut self) -> Self {
        self.use_color = Some(false);
        self
    }

    pub fn with_colors(mut self) -> Self {
        self.use_color = Some(true);
        self
    }

    /// Render the full beat map block
    pub fn render(&self, report: &BeatMapReport) -> String {
        let use_color = self.use_color.unwrap_or(report.use_color);
        let inner = self.width.saturating_sub(4).max(20);
        let bar_width = inner.saturating_sub(17).max(1);
        let n = report.segments.len();

        let mut lines: Vec<String> = Vec::new();
        lines.push(self.border_top(inner));
        lines.push(self.boxed_centered("DEGRADATION BEAT MAP", inner));
        lines.push(self.border_mid(inner));
        lines.push(self.boxed_plain("", inner));

        let header = format!(
            "Segments: {} (requested {}) | Words: {}",
            report.effective_segments, report.requested_segments, report.word_count
        );
        lines.push(self.boxed_plain(&header, inner));
        lines.push(self.boxed_plain("", inner));

        // document flow: the full timeline
        let mut flow = Fragment::default();
        flow.push_plain("Document Flow: [");
        flow.push_plain(&"█".repeat(bar_width));
        flow.push_plain("]");
        lines.push(self.boxed(&flow, inner));

        // combined degradation, one severity-shaded cell per column
        let mut bar = Fragment::default();
        bar.push_plain("Degradation:   [");
        for (severity, count) in column_runs(bar_width, n, |seg| {
            classify(report.segments[seg].degradation, &report.thresholds)
        }) {
            bar.push_severity(&severity.shade().to_string().repeat(count), severity, use_color);
        }
        bar.push_plain("]");
        lines.push(self.boxed(&bar, inner));

        for line in spike_rows(report, bar_width, n) {
            lines.push(self.boxed_plain(&line, inner));
        }

        lines.push(self.boxed_plain("", inner));
        lines.push(self.boxed_plain("Category Breakdown:", inner));

        let cat_bar_width = inner.saturating_sub(22).max(1);
        for category in Category::ALL {
            lines.push(self.boxed(&self.category_line(report, category, cat_bar_width, use_color), inner));
        }

        lines.push(self.boxed_plain("", inner));
        for line in wrap(&format!("Key Finding: {}", report.summary.finding), inner) {
            lines.push(self.boxed_plain(&line, inner));
        }
        for line in wrap(&format!("Recommendation: {}", report.summary.action), inner) {
            lines.push(self.boxed_plain(&line, inner));
        }
        lines.push(self.border_bottom(inner));

        lines.join("\n")
    }

    fn category_line(
        &self,
        report: &BeatMapReport,
        category: Category,
        bar_width: usize,
        use_color: bool,
    ) -> Fragment {
        let n = report.segments.len();
        let mean = report.category_mean(category);
        let severity = classify(mean, &report.thresholds);

        let mut line = Fragment::default();
        line.push_plain(&format!("{}: [", category.abbrev()));
        for (sev, count) in column_runs(bar_width, n, |seg| {
            report.segments[seg].severities.get(category)
        }) {
            line.push_severity(&sev.shade().to_string().repeat(count), sev, use_color);
        }
        line.push_plain(&format!("] {:>3.0}% ", mean * 100.0));
        line.push_severity(&format!("({})", severity.status()), severity, use_color);
        line
    }

    fn border_top(&self, inner: usize) -> String {
        format!("╔{}╗", "═".repeat(inner + 2))
    }

    fn border_mid(&self, inner: usize) -> String {
        format!("╠{}╣", "═".repeat(inner + 2))
    }

    fn border_bottom(&self, inner: usize) -> String {
        format!("╚{}╝", "═".repeat(inner + 2))
    }

    fn boxed(&self, fragment: &Fragment, inner: usize) -> String {
        let pad = inner.saturating_sub(fragment.visible_len());
        format!("║ {}{} ║", fragment.colored, " ".repeat(pad))
    }

    fn boxed_plain(&self, text: &str, inner: usize) -> String {
        let mut fragment = Fragment::default();
        fragment.push_plain(text);
        self.boxed(&fragment, inner)
    }

    fn boxed_centered(&self, text: &str, inner: usize) -> String {
        let len = text.chars().count();
        let left = inner.saturating_sub(len) / 2;
        self.boxed_plain(&format!("{}{}", " ".repeat(left), text), inner)
    }
}

impl Default for AsciiReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Map bar columns onto segments and group equal-severity runs
fn column_runs(
    bar_width: usize,
    n: usize,
    severity_of: impl Fn(usize) -> Severity,
) -> Vec<(Severity, usize)> {
    let mut runs: Vec<(Severity, usize)> = Vec::new();
    for column in 0..bar_width {
        let segment = column * n / bar_width;
        let severity = severity_of(segment);
        match runs.last_mut() {
            Some((last, count)) if *last == severity => *count += 1,
            _ => runs.push((severity, 1)),
        }
    }
    runs
}

/// Marker row (`↑` under spike columns) and position row (`@ NN%` labels);
/// empty when the report has no spikes
fn spike_rows(report: &BeatMapReport, bar_width: usize, n: usize) -> Vec<String> {
    if report.spikes.is_empty() {
        return Vec::new();
    }

    // distinct spiked segments, in order
    let mut segments: Vec<usize> = Vec::new();
    for spike in &report.spikes {
        if !segments.contains(&spike.segment) {
            segments.push(spike.segment);
        }
    }

    let prefix: String = " ".repeat(16);
    let mut markers = vec![' '; bar_width];
    let mut labels = vec![' '; bar_width];
    let mut next_free = 0usize;

    for &segment in &segments {
        let column = segment * bar_width / n.max(1);
        if column < bar_width {
            markers[column] = '↑';
        }
        let pct = segment * 100 / n.max(1);
        let label: Vec<char> = format!("@ {pct}%").chars().collect();
        if column >= next_free && column + label.len() <= bar_width {
            labels[column..column + label.len()].copy_from_slice(&label);
            next_free = column + label.len() + 1;
        }
    }

    vec![
        format!("{}{}", prefix, markers.into_iter().collect::<String>()),
        format!("{}{}", prefix, labels.into_iter().collect::<String>()),
    ]
}

/// Chunk text into lines of at most `inner` visible characters
fn wrap(text: &str, inner: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= inner {
        return vec![text.to_string()];
    }
    chars
        .chunks(inner)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BeatMapAnalyzer;

    const SAMPLE: &str = "Artificial intelligence is transforming the world. \
        AI is changing everything. Machine learning models are very powerful. \
        They can do many things. They are useful for various applications. \
        Many people use AI systems. These systems are increasingly common. \
        They help with tasks. AI helps people. Understanding is key.";

    fn sample_report(use_color: bool) -> BeatMapReport {
        BeatMapAnalyzer::new(8, use_color)
            .unwrap()
            .analyze(SAMPLE)
            .unwrap()
    }

    #[test]
    fn rendering_is_deterministic() {
        let report = sample_report(true);
        let reporter = AsciiReporter::new().with_width(70);
        assert_eq!(reporter.render(&report), reporter.render(&report));
    }

    #[test]
    fn no_color_output_has_no_escape_codes() {
        let report = sample_report(false);
        let output = AsciiReporter::new().render(&report);
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn colored_output_resets_after_runs() {
        let report = sample_report(true);
        let output = AsciiReporter::new().render(&report);
        if output.contains('\x1b') {
            assert!(output.contains(RESET));
        }
    }

    #[test]
    fn every_line_has_the_same_visible_width() {
        let report = sample_report(false);
        let output = AsciiReporter::new().with_width(64).render(&report);
        let widths: Vec<usize> = output.lines().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]), "{widths:?}");
    }

    #[test]
    fn category_lines_show_all_six_abbreviations() {
        let report = sample_report(false);
        let output = AsciiReporter::new().render(&report);
        for category in Category::ALL {
            assert!(output.contains(&format!("{}:", category.abbrev())));
        }
    }

    #[test]
    fn shading_vocabulary_survives_without_color() {
        let report = sample_report(false);
        let output = AsciiReporter::new().render(&report);
        // the degradation bar must still distinguish severities
        assert!(output.contains('░') || output.contains('▒') || output.contains('▓') || output.contains('█'));
    }

    #[test]
    fn header_reports_effective_and_requested_counts() {
        let report = BeatMapAnalyzer::new(50, false)
            .unwrap()
            .analyze("only a few words here to work with")
            .unwrap();
        let output = AsciiReporter::new().render(&report);
        assert!(output.contains("Segments: 8 (requested 50)"));
    }

    #[test]
    fn spike_markers_appear_for_degraded_content() {
        let repeated = "Growth happens every single day. ".repeat(20);
        let report = BeatMapAnalyzer::new(10, false)
            .unwrap()
            .analyze(&repeated)
            .unwrap();
        assert!(!report.spikes.is_empty());
        let output = AsciiReporter::new().render(&report);
        assert!(output.contains('↑'));
        assert!(output.contains("@ 0%"));
    }
}
