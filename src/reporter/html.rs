//! HTML beat map renderer: generates a self-contained interactive page.
//!
//! Every segment/category pair becomes one cell carrying its numeric
//! score and severity as data attributes, so the profile is inspectable
//! without executing any script. No external styles, scripts, or fonts
//! are referenced; rendering is a single pass over the report.

use crate::analyzer::severity::classify;
use crate::{BeatMapReport, Category};

/// Escapes text for embedding in HTML content and attribute values
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Reporter that generates a self-contained HTML beat map
pub struct HtmlReporter;

impl HtmlReporter {
    pub fn new() -> Self {
        Self
    }

    /// Render the full page
    pub fn render(&self, report: &BeatMapReport) -> String {
        let mut html = String::with_capacity(16_384);
        html.push_str(Self::template_head());
        html.push_str("<body>\n<div class=\"beatmap\">\n<h1>Degradation Beat Map</h1>\n");

        html.push_str(&format!(
            "<p class=\"meta\">{} segments | {} words | average degradation {:.0}%</p>\n",
            report.effective_segments,
            report.word_count,
            report.average_degradation * 100.0
        ));

        html.push_str("<section class=\"timeline\">\n");
        self.push_overall_row(&mut html, report);
        for category in Category::ALL {
            self.push_category_row(&mut html, report, category);
        }
        html.push_str("</section>\n");

        self.push_spikes(&mut html, report);
        self.push_summary(&mut html, report);

        html.push_str("</div>\n</body>\n</html>\n");
        html
    }

    /// Combined degradation, one cell per segment
    fn push_overall_row(&self, html: &mut String, report: &BeatMapReport) {
        html.push_str("<div class=\"row\" data-kind=\"overall\"><span class=\"label\">ALL</span><div class=\"track\">");
        for seg in &report.segments {
            let severity = classify(seg.degradation, &report.thresholds);
            html.push_str(&format!(
                "<div class=\"cell sev-{sev}\" data-segment=\"{index}\" data-score=\"{score:.3}\" \
                 data-severity=\"{sev}\" title=\"Segment {no}: {pct:.0}% degradation ({issue})\"></div>",
                sev = severity.to_string().to_lowercase(),
                index = seg.index,
                score = seg.degradation,
                no = seg.index + 1,
                pct = seg.degradation * 100.0,
                issue = escape_html(&seg.primary_issue.to_string()),
            ));
        }
        html.push_str("</div><span class=\"pct\"></span></div>\n");
    }

    /// One category timeline, one cell per segment
    fn push_category_row(&self, html: &mut String, report: &BeatMapReport, category: Category) {
        html.push_str(&format!(
            "<div class=\"row\" data-category=\"{}\"><span class=\"label\">{}</span><div class=\"track\">",
            category.slug(),
            category.abbrev()
        ));
        for seg in &report.segments {
            let score = seg.categories.get(category);
            let severity = seg.severities.get(category);
            html.push_str(&format!(
                "<div class=\"cell sev-{sev}\" data-segment=\"{index}\" data-category=\"{slug}\" \
                 data-score=\"{score:.3}\" data-severity=\"{sev}\" \
                 title=\"Segment {no}: {pct:.0}% ({name}, {level})\"></div>",
                sev = severity.to_string().to_lowercase(),
                index = seg.index,
                slug = category.slug(),
                score = score,
                no = seg.index + 1,
                pct = score * 100.0,
                name = escape_html(&category.to_string()),
                level = severity,
            ));
        }
        let mean = report.category_mean(category);
        html.push_str(&format!(
            "</div><span class=\"pct\">{:.0}%</span></div>\n",
            mean * 100.0
        ));
    }

    fn push_spikes(&self, html: &mut String, report: &BeatMapReport) {
        if report.spikes.is_empty() {
            return;
        }
        html.push_str("<section class=\"spikes\">\n<h2>Spikes</h2>\n<ul>\n");
        for spike in &report.spikes {
            html.push_str(&format!(
                "<li data-segment=\"{}\" data-category=\"{}\" data-severity=\"{}\">\
                 Segment {}: {} {} @ {}%</li>\n",
                spike.segment,
                spike.category.slug(),
                spike.severity.to_string().to_lowercase(),
                spike.segment + 1,
                escape_html(&spike.category.to_string()),
                spike.severity,
                spike.position_pct,
            ));
        }
        html.push_str("</ul>\n</section>\n");
    }

    fn push_summary(&self, html: &mut String, report: &BeatMapReport) {
        html.push_str("<section class=\"summary\">\n");
        html.push_str(&format!(
            "<p><strong>Key finding:</strong> {}</p>\n",
            escape_html(&report.summary.finding)
        ));
        html.push_str(&format!(
            "<p><strong>Recommendation:</strong> {}</p>\n",
            escape_html(&report.summary.action)
        ));
        html.push_str(&format!(
            "<p class=\"overview\">{}</p>\n",
            escape_html(&report.summary.summary)
        ));
        html.push_str("</section>\n");
    }

    fn template_head() -> &'static str {
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Degradation Beat Map</title>
<style>
:root{--bg:#1a1a1a;--surface:#2a2a2a;--track:#333;--text:#e4e4e7;--muted:#9a9aa2;--green:#00ff00;--yellow:#ffff00;--orange:#ff8800;--red:#ff0000}
*{box-sizing:border-box;margin:0;padding:0}
body{font-family:'Courier New',monospace;background:var(--bg);color:var(--text);line-height:1.5;padding:20px}
.beatmap{max-width:960px;margin:0 auto}
h1{text-align:center;color:var(--green);margin-bottom:8px}
h2{font-size:1rem;margin:16px 0 8px}
.meta{text-align:center;color:var(--muted);margin-bottom:20px}
.row{display:flex;align-items:center;margin:5px 0}
.row .label{width:60px;font-weight:bold}
.row .pct{width:56px;text-align:right;color:var(--muted)}
.track{display:flex;flex:1;height:22px;background:var(--track);border-radius:4px;overflow:hidden}
.cell{flex:1;height:100%;cursor:pointer}
.cell:hover{opacity:.7}
.sev-green{background:var(--green)}
.sev-yellow{background:var(--yellow)}
.sev-orange{background:var(--orange)}
.sev-red{background:var(--red)}
.spikes ul{list-style:none}
.spikes li{padding:2px 0;color:var(--muted)}
.summary{margin-top:24px;padding:15px;background:var(--surface);border-left:4px solid var(--green);border-radius:4px}
.summary p{margin:5px 0}
.summary .overview{color:var(--muted)}
</style>
</head>
"##
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}
