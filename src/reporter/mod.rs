//! Reporter module for output formatting

pub mod ascii;
pub mod html;
pub mod json;

pub use ascii::AsciiReporter;
pub use html::HtmlReporter;
pub use json::JsonReporter;

use crate::{BeatMapReport, ExecutiveSummary};

/// Render the ASCII beat map at the given width. Color follows the
/// report's `use_color` flag.
pub fn render_ascii(report: &BeatMapReport, width: usize) -> String {
    AsciiReporter::new().with_width(width).render(report)
}

/// Render the self-contained HTML beat map
pub fn render_html(report: &BeatMapReport) -> String {
    HtmlReporter::new().render(report)
}

/// The meeting-ready summary for a report
pub fn summarize(report: &BeatMapReport) -> ExecutiveSummary {
    report.summary.clone()
}
