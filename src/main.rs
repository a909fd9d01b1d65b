//! Beatmap: degradation beat map CLI

use anyhow::{Context, Result};
use beatmap::config::{load_config, CONFIG_FILENAME};
use beatmap::reporter::{AsciiReporter, HtmlReporter, JsonReporter};
use beatmap::{BeatMapAnalyzer, Severity};
use clap::Parser;
use colored::Colorize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Beatmap: segment-level degradation analysis for generated text
#[derive(Parser, Debug)]
#[command(name = "beatmap")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text file to analyze (use '-' for stdin)
    path: PathBuf,

    /// Number of timeline segments
    #[arg(long, short)]
    segments: Option<usize>,

    /// Character width of the ASCII beat map
    #[arg(long, short)]
    width: Option<usize>,

    /// Disable colors (severity stays readable via shading characters)
    #[arg(long)]
    no_color: bool,

    /// Output the full report as JSON
    #[arg(long, short)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Write the HTML beat map (to PATH, or stdout when omitted)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    html: Option<Option<PathBuf>>,

    /// Print the meeting-ready summary block after the beat map
    #[arg(long)]
    summary: bool,

    /// Path to config file (default: search .beatmaprc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable parallel per-segment extraction
    #[arg(long)]
    sequential: bool,

    /// Exit with code 1 when any category spikes Red
    #[arg(long)]
    fail_on_red: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    let work_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut config = load_config(&work_dir, args.config.as_deref())
        .with_context(|| format!("while loading {}", CONFIG_FILENAME))?;

    if let Some(segments) = args.segments {
        config.segments = segments;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if args.no_color {
        config.use_color = false;
    }
    if args.sequential {
        config.parallel = false;
    }

    let content = read_content(&args.path)?;

    let analyzer = BeatMapAnalyzer::from_config(config.clone())?;
    let report = analyzer.analyze(&content)?;

    if report.was_clamped() {
        eprintln!(
            "{} content supports only {} segments (requested {})",
            "Note:".yellow().bold(),
            report.effective_segments,
            report.requested_segments
        );
    }

    if args.json {
        let reporter = if args.pretty {
            JsonReporter::new().pretty()
        } else {
            JsonReporter::new()
        };
        println!("{}", reporter.report(&report));
    } else if let Some(target) = &args.html {
        let html = HtmlReporter::new().render(&report);
        match target {
            Some(path) => {
                std::fs::write(path, &html)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("HTML beat map written to {}", path.display());
            }
            None => print!("{html}"),
        }
    } else {
        let output = AsciiReporter::new().with_width(config.width).render(&report);
        println!("{output}");

        if args.summary {
            let summary = beatmap::summarize(&report);
            println!();
            println!("{}", "═".repeat(config.width));
            println!("{}", "Summary".bold());
            println!("{}", "═".repeat(config.width));
            println!("   {}", summary.summary);
            println!("   {} {}", "Finding:".bold(), summary.finding);
            println!("   {} {}", "Action:".bold(), summary.action);
        }
    }

    if args.fail_on_red
        && report
            .spikes
            .iter()
            .any(|spike| spike.severity == Severity::Red)
    {
        return Ok(ExitCode::from(1));
    }

    Ok(ExitCode::SUCCESS)
}

fn read_content(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        Ok(content)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))
    }
}
