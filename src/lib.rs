//! Beatmap: degradation analysis for generated text
//!
//! This library splits a block of text into ordered segments, computes a
//! fixed set of shallow statistical signals per segment, aggregates them
//! into six degradation categories, classifies severity, and renders the
//! resulting profile as a color-coded timeline (ASCII or HTML).

pub mod analyzer;
pub mod config;
pub mod error;
pub mod report;
pub mod reporter;
pub mod segmenter;

use serde::{Deserialize, Serialize};

pub use analyzer::BeatMapAnalyzer;
pub use config::{Config, SeverityThresholds};
pub use error::AnalysisError;
pub use reporter::{render_ascii, render_html, summarize};

/// The six degradation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Repetition,
    Vagueness,
    IntentDecay,
    ConfidenceInflation,
    VoiceDegradation,
    EntropyCollapse,
}

impl Category {
    /// All categories in declaration order (the canonical display order)
    pub const ALL: [Category; 6] = [
        Category::Repetition,
        Category::Vagueness,
        Category::IntentDecay,
        Category::ConfidenceInflation,
        Category::VoiceDegradation,
        Category::EntropyCollapse,
    ];

    /// Kebab-case identifier used in machine-readable output
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Repetition => "repetition",
            Category::Vagueness => "vagueness",
            Category::IntentDecay => "intent-decay",
            Category::ConfidenceInflation => "confidence-inflation",
            Category::VoiceDegradation => "voice-degradation",
            Category::EntropyCollapse => "entropy-collapse",
        }
    }

    /// Three-letter abbreviation used in compact displays
    pub fn abbrev(&self) -> &'static str {
        match self {
            Category::Repetition => "REP",
            Category::Vagueness => "VAG",
            Category::IntentDecay => "INT",
            Category::ConfidenceInflation => "CNF",
            Category::VoiceDegradation => "VOI",
            Category::EntropyCollapse => "ENT",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Repetition => write!(f, "Repetition"),
            Category::Vagueness => write!(f, "Vagueness"),
            Category::IntentDecay => write!(f, "Intent Decay"),
            Category::ConfidenceInflation => write!(f, "Confidence Inflation"),
            Category::VoiceDegradation => write!(f, "Voice Degradation"),
            Category::EntropyCollapse => write!(f, "Entropy Collapse"),
        }
    }
}

/// One of the 14 per-segment signal vectors.
///
/// Every vector is oriented so that higher means more degraded; category
/// aggregation is then a plain convex combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Vector {
    WordRepetition,
    NgramRepetition,
    PhraseEcho,
    DuplicateSentences,
    SentenceUniformity,
    HedgingDensity,
    VagueReference,
    FillerDensity,
    CertaintyDensity,
    OpeningDrift,
    PersonDrift,
    RegisterShift,
    InfoDrought,
    EntropyDrop,
}

impl Vector {
    /// All vectors in declaration order
    pub const ALL: [Vector; 14] = [
        Vector::WordRepetition,
        Vector::NgramRepetition,
        Vector::PhraseEcho,
        Vector::DuplicateSentences,
        Vector::SentenceUniformity,
        Vector::HedgingDensity,
        Vector::VagueReference,
        Vector::FillerDensity,
        Vector::CertaintyDensity,
        Vector::OpeningDrift,
        Vector::PersonDrift,
        Vector::RegisterShift,
        Vector::InfoDrought,
        Vector::EntropyDrop,
    ];
}

impl std::fmt::Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vector::WordRepetition => write!(f, "word-repetition"),
            Vector::NgramRepetition => write!(f, "ngram-repetition"),
            Vector::PhraseEcho => write!(f, "phrase-echo"),
            Vector::DuplicateSentences => write!(f, "duplicate-sentences"),
            Vector::SentenceUniformity => write!(f, "sentence-uniformity"),
            Vector::HedgingDensity => write!(f, "hedging-density"),
            Vector::VagueReference => write!(f, "vague-reference"),
            Vector::FillerDensity => write!(f, "filler-density"),
            Vector::CertaintyDensity => write!(f, "certainty-density"),
            Vector::OpeningDrift => write!(f, "opening-drift"),
            Vector::PersonDrift => write!(f, "person-drift"),
            Vector::RegisterShift => write!(f, "register-shift"),
            Vector::InfoDrought => write!(f, "info-drought"),
            Vector::EntropyDrop => write!(f, "entropy-drop"),
        }
    }
}

/// The 14 signal values for one segment, each in [0,1]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorScore {
    pub word_repetition: f64,
    pub ngram_repetition: f64,
    pub phrase_echo: f64,
    pub duplicate_sentences: f64,
    pub sentence_uniformity: f64,
    pub hedging_density: f64,
    pub vague_reference: f64,
    pub filler_density: f64,
    pub certainty_density: f64,
    pub opening_drift: f64,
    pub person_drift: f64,
    pub register_shift: f64,
    pub info_drought: f64,
    pub entropy_drop: f64,
}

impl VectorScore {
    pub fn get(&self, vector: Vector) -> f64 {
        match vector {
            Vector::WordRepetition => self.word_repetition,
            Vector::NgramRepetition => self.ngram_repetition,
            Vector::PhraseEcho => self.phrase_echo,
            Vector::DuplicateSentences => self.duplicate_sentences,
            Vector::SentenceUniformity => self.sentence_uniformity,
            Vector::HedgingDensity => self.hedging_density,
            Vector::VagueReference => self.vague_reference,
            Vector::FillerDensity => self.filler_density,
            Vector::CertaintyDensity => self.certainty_density,
            Vector::OpeningDrift => self.opening_drift,
            Vector::PersonDrift => self.person_drift,
            Vector::RegisterShift => self.register_shift,
            Vector::InfoDrought => self.info_drought,
            Vector::EntropyDrop => self.entropy_drop,
        }
    }

    pub fn set(&mut self, vector: Vector, value: f64) {
        let slot = match vector {
            Vector::WordRepetition => &mut self.word_repetition,
            Vector::NgramRepetition => &mut self.ngram_repetition,
            Vector::PhraseEcho => &mut self.phrase_echo,
            Vector::DuplicateSentences => &mut self.duplicate_sentences,
            Vector::SentenceUniformity => &mut self.sentence_uniformity,
            Vector::HedgingDensity => &mut self.hedging_density,
            Vector::VagueReference => &mut self.vague_reference,
            Vector::FillerDensity => &mut self.filler_density,
            Vector::CertaintyDensity => &mut self.certainty_density,
            Vector::OpeningDrift => &mut self.opening_drift,
            Vector::PersonDrift => &mut self.person_drift,
            Vector::RegisterShift => &mut self.register_shift,
            Vector::InfoDrought => &mut self.info_drought,
            Vector::EntropyDrop => &mut self.entropy_drop,
        };
        *slot = value;
    }
}

/// The six category scores for one segment, each in [0,1]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub repetition: f64,
    pub vagueness: f64,
    pub intent_decay: f64,
    pub confidence_inflation: f64,
    pub voice_degradation: f64,
    pub entropy_collapse: f64,
}

impl CategoryScore {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Repetition => self.repetition,
            Category::Vagueness => self.vagueness,
            Category::IntentDecay => self.intent_decay,
            Category::ConfidenceInflation => self.confidence_inflation,
            Category::VoiceDegradation => self.voice_degradation,
            Category::EntropyCollapse => self.entropy_collapse,
        }
    }

    pub fn set(&mut self, category: Category, value: f64) {
        let slot = match category {
            Category::Repetition => &mut self.repetition,
            Category::Vagueness => &mut self.vagueness,
            Category::IntentDecay => &mut self.intent_decay,
            Category::ConfidenceInflation => &mut self.confidence_inflation,
            Category::VoiceDegradation => &mut self.voice_degradation,
            Category::EntropyCollapse => &mut self.entropy_collapse,
        };
        *slot = value;
    }

    /// Combined degradation for the segment: unweighted mean of the six
    pub fn combined(&self) -> f64 {
        (self.repetition
            + self.vagueness
            + self.intent_decay
            + self.confidence_inflation
            + self.voice_degradation
            + self.entropy_collapse)
            / 6.0
    }

    /// Category with the highest score; declaration order breaks ties
    pub fn primary(&self) -> Category {
        let mut best = Category::Repetition;
        let mut best_value = self.repetition;
        for category in Category::ALL {
            let value = self.get(category);
            if value > best_value {
                best = category;
                best_value = value;
            }
        }
        best
    }
}

/// Discrete severity level, ordered from healthy to critical
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Green,
    Yellow,
    Orange,
    Red,
}

impl Severity {
    /// Shading character for color-free output: `░ ▒ ▓ █`
    pub fn shade(&self) -> char {
        match self {
            Severity::Green => '░',
            Severity::Yellow => '▒',
            Severity::Orange => '▓',
            Severity::Red => '█',
        }
    }

    /// Status label shown next to category scores
    pub fn status(&self) -> &'static str {
        match self {
            Severity::Green => "Good",
            Severity::Yellow => "Caution",
            Severity::Orange => "Warning",
            Severity::Red => "Alert!",
        }
    }

    /// Hex color for the HTML timeline
    pub fn hex(&self) -> &'static str {
        match self {
            Severity::Green => "#00ff00",
            Severity::Yellow => "#ffff00",
            Severity::Orange => "#ff8800",
            Severity::Red => "#ff0000",
        }
    }

    /// Orange and Red are what the beat map visually foregrounds
    pub fn is_spike(&self) -> bool {
        *self >= Severity::Orange
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Green => write!(f, "Green"),
            Severity::Yellow => write!(f, "Yellow"),
            Severity::Orange => write!(f, "Orange"),
            Severity::Red => write!(f, "Red"),
        }
    }
}

/// Per-category severity levels for one segment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySeverities {
    pub repetition: Severity,
    pub vagueness: Severity,
    pub intent_decay: Severity,
    pub confidence_inflation: Severity,
    pub voice_degradation: Severity,
    pub entropy_collapse: Severity,
}

impl CategorySeverities {
    pub fn get(&self, category: Category) -> Severity {
        match category {
            Category::Repetition => self.repetition,
            Category::Vagueness => self.vagueness,
            Category::IntentDecay => self.intent_decay,
            Category::ConfidenceInflation => self.confidence_inflation,
            Category::VoiceDegradation => self.voice_degradation,
            Category::EntropyCollapse => self.entropy_collapse,
        }
    }

    pub fn set(&mut self, category: Category, severity: Severity) {
        let slot = match category {
            Category::Repetition => &mut self.repetition,
            Category::Vagueness => &mut self.vagueness,
            Category::IntentDecay => &mut self.intent_decay,
            Category::ConfidenceInflation => &mut self.confidence_inflation,
            Category::VoiceDegradation => &mut self.voice_degradation,
            Category::EntropyCollapse => &mut self.entropy_collapse,
        };
        *slot = severity;
    }

    /// Highest severity across the six categories
    pub fn worst(&self) -> Severity {
        Category::ALL
            .iter()
            .map(|c| self.get(*c))
            .max()
            .unwrap_or_default()
    }
}

/// Confidence band for a segment's combined score: scores near either end
/// of the scale are easier to call than mid-range ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
}

impl Confidence {
    pub fn from_score(value: f64) -> Self {
        if value < 0.3 || value > 0.7 {
            Confidence::High
        } else {
            Confidence::Medium
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "High"),
            Confidence::Medium => write!(f, "Medium"),
        }
    }
}

/// A segment/category pair whose severity reached Orange or Red
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spike {
    /// Segment index (0-based)
    pub segment: usize,
    pub category: Category,
    pub severity: Severity,
    /// Category score that triggered the spike
    pub value: f64,
    /// Segment start position as a percentage of the timeline
    pub position_pct: u8,
}

/// Peak segment and value for one category across the whole document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPeak {
    pub category: Category,
    /// Segment index of the peak (earliest on ties)
    pub segment: usize,
    pub value: f64,
}

/// Meeting-ready executive summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveSummary {
    /// One-paragraph overview of the run
    pub summary: String,
    /// Key finding: dominant issue and where it peaks
    pub finding: String,
    /// Recommended action for the dominant issue
    pub action: String,
}

/// Full analysis record for one segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentAnalysis {
    /// Segment index (0-based)
    pub index: usize,
    /// Start byte offset in the document
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// Words in the segment
    pub word_count: usize,
    pub vectors: VectorScore,
    pub categories: CategoryScore,
    pub severities: CategorySeverities,
    /// Combined degradation score (mean of the six categories)
    pub degradation: f64,
    /// Category with the highest score in this segment
    pub primary_issue: Category,
    pub confidence: Confidence,
}

/// The complete degradation profile for one analysis run.
///
/// Built once, immutable, and the sole input to every renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeatMapReport {
    /// Segment count the caller asked for
    pub requested_segments: usize,
    /// Segment count actually used (clamped to the word count)
    pub effective_segments: usize,
    /// Total words in the document
    pub word_count: usize,
    /// Whether the ASCII renderer should color its output
    pub use_color: bool,
    /// Severity thresholds the classification used
    pub thresholds: SeverityThresholds,
    pub segments: Vec<SegmentAnalysis>,
    /// One peak per category, in category declaration order
    pub peaks: Vec<CategoryPeak>,
    /// Category with the most Orange/Red segments (peak value breaks ties)
    pub dominant_issue: Category,
    /// Mean combined degradation across segments
    pub average_degradation: f64,
    pub spikes: Vec<Spike>,
    pub summary: ExecutiveSummary,
}

impl BeatMapReport {
    /// True when the requested segment count exceeded the word count
    pub fn was_clamped(&self) -> bool {
        self.effective_segments < self.requested_segments
    }

    /// Mean score for one category across all segments
    pub fn category_mean(&self, category: Category) -> f64 {
        if self.segments.is_empty() {
            return 0.0;
        }
        let sum: f64 = self
            .segments
            .iter()
            .map(|s| s.categories.get(category))
            .sum();
        sum / self.segments.len() as f64
    }

    /// Peak entry for one category
    pub fn peak(&self, category: Category) -> &CategoryPeak {
        self.peaks
            .iter()
            .find(|p| p.category == category)
            .expect("peaks cover every category")
    }
}

/// Public API: analyze a content string with the given configuration.
/// Convenience wrapper over [`BeatMapAnalyzer`].
pub fn analyze_content(content: &str, config: &Config) -> Result<BeatMapReport, AnalysisError> {
    BeatMapAnalyzer::from_config(config.clone())?.analyze(content)
}
