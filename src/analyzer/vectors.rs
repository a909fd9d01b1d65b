//! The 14 per-segment signal vectors.
//!
//! Every formula is self-contained and deterministic: the same segment
//! text plus the same document profile always yields the same value, and
//! every value is clamped to [0,1]. Signals that need more sample than a
//! segment provides (a lone word, a single sentence) return the neutral
//! 0.0 instead of failing.

use crate::analyzer::context::{
    mean_sentence_len, normalize_sentence, person_of, sentences, trigrams, DocumentProfile,
};
use crate::segmenter::{tokenize, Segment};
use crate::VectorScore;
use std::collections::{HashMap, HashSet};

/// Hedges and qualifiers: the language of not quite committing
const HEDGES: &[&str] = &[
    "perhaps", "maybe", "possibly", "somewhat", "arguably", "likely", "might", "could", "seems",
    "seemingly", "appears", "apparently", "presumably", "generally", "often", "usually",
    "relatively", "fairly", "roughly", "somehow",
];

/// Vague referents that carry little concrete content
const VAGUE_TERMS: &[&str] = &[
    "thing", "things", "stuff", "something", "someone", "somewhere", "various", "several",
    "numerous", "aspect", "aspects", "factor", "factors", "element", "elements", "item", "items",
    "matter", "matters", "etc",
];

/// Intensifiers and fillers that pad without informing
const FILLERS: &[&str] = &[
    "very", "really", "quite", "just", "actually", "basically", "literally", "simply", "totally",
    "completely", "extremely", "highly", "incredibly", "truly", "utterly",
];

/// Absolute and superlative markers of inflated certainty
const CERTAINTY_MARKERS: &[&str] = &[
    "always", "never", "all", "every", "none", "must", "definitely", "certainly", "clearly",
    "obviously", "undoubtedly", "absolutely", "guaranteed", "unquestionably", "best", "worst",
    "perfect", "essential", "critical", "revolutionary",
];

/// Closed-class function words for the content/function balance
const FUNCTION_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "nor", "so", "yet", "of", "in", "on", "at", "to",
    "from", "by", "with", "for", "as", "into", "onto", "over", "under", "about", "after",
    "before", "between", "through", "during", "is", "are", "was", "were", "be", "been", "being",
    "am", "do", "does", "did", "have", "has", "had", "will", "would", "shall", "should", "can",
    "may", "it", "its", "this", "that", "these", "those", "there", "here", "not", "no",
];

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

fn density(tokens: &[String], table: &[&str], scale: f64) -> f64 {
    let hits = tokens.iter().filter(|t| table.contains(&t.as_str())).count();
    clamp01(hits as f64 / tokens.len() as f64 * scale)
}

/// Compute all 14 vectors for one segment
pub fn extract(segment: &Segment, profile: &DocumentProfile) -> VectorScore {
    let tokens = tokenize(segment.text);
    let mut scores = VectorScore::default();
    if tokens.is_empty() {
        return scores;
    }

    scores.word_repetition = word_repetition(&tokens);
    scores.ngram_repetition = ngram_repetition(&tokens);
    scores.phrase_echo = phrase_echo(&tokens, profile);
    scores.duplicate_sentences = duplicate_sentences(segment.text, profile);
    scores.sentence_uniformity = sentence_uniformity(segment.text);
    scores.hedging_density = density(&tokens, HEDGES, 12.5);
    scores.vague_reference = density(&tokens, VAGUE_TERMS, 10.0);
    scores.filler_density = density(&tokens, FILLERS, 10.0);
    scores.certainty_density = density(&tokens, CERTAINTY_MARKERS, 12.5);
    scores.opening_drift = opening_drift(segment.text, &tokens, profile);
    scores.person_drift = person_drift(&tokens, profile);
    scores.register_shift = register_shift(&tokens, profile);
    scores.info_drought = info_drought(&tokens);
    scores.entropy_drop = entropy_drop(&tokens);
    scores
}

/// 1 - distinct/total words within the segment
fn word_repetition(tokens: &[String]) -> f64 {
    let distinct: HashSet<&str> = tokens.iter().map(|t| t.as_str()).collect();
    clamp01(1.0 - distinct.len() as f64 / tokens.len() as f64)
}

/// Fraction of the segment's trigram instances that repeat within it
fn ngram_repetition(tokens: &[String]) -> f64 {
    let tris = trigrams(tokens);
    if tris.is_empty() {
        return 0.0;
    }
    let distinct: HashSet<&str> = tris.iter().map(|t| t.as_str()).collect();
    clamp01((tris.len() - distinct.len()) as f64 / tris.len() as f64)
}

/// Fraction of the segment's distinct trigrams that also occur elsewhere
/// in the document
fn phrase_echo(tokens: &[String], profile: &DocumentProfile) -> f64 {
    let mut local: HashMap<String, usize> = HashMap::new();
    for tri in trigrams(tokens) {
        *local.entry(tri).or_insert(0) += 1;
    }
    if local.is_empty() {
        return 0.0;
    }
    let echoed = local
        .iter()
        .filter(|(tri, &count)| {
            profile.trigram_counts.get(*tri).copied().unwrap_or(0) > count
        })
        .count();
    clamp01(echoed as f64 / local.len() as f64)
}

/// Fraction of the segment's sentences that occur verbatim elsewhere in
/// the document (after whitespace/case normalization)
fn duplicate_sentences(text: &str, profile: &DocumentProfile) -> f64 {
    let normalized: Vec<String> = sentences(text).iter().map(|s| normalize_sentence(s)).collect();
    if normalized.is_empty() {
        return 0.0;
    }
    let mut local: HashMap<&str, usize> = HashMap::new();
    for sentence in &normalized {
        *local.entry(sentence.as_str()).or_insert(0) += 1;
    }
    let duplicated = normalized
        .iter()
        .filter(|s| {
            let here = local[s.as_str()];
            profile.sentence_counts.get(s.as_str()).copied().unwrap_or(0) > here
        })
        .count();
    clamp01(duplicated as f64 / normalized.len() as f64)
}

/// 1 - normalized dispersion of sentence lengths. Monotone prose (every
/// sentence the same size) scores 1; natural variation scores near 0.
fn sentence_uniformity(text: &str) -> f64 {
    let lens: Vec<f64> = sentences(text)
        .iter()
        .map(|s| tokenize(s).len() as f64)
        .filter(|&n| n > 0.0)
        .collect();
    if lens.len() < 2 {
        return 0.0;
    }
    let mean = lens.iter().sum::<f64>() / lens.len() as f64;
    let variance = lens.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / lens.len() as f64;
    let cv = variance.sqrt() / mean;
    clamp01(1.0 - cv / 0.6)
}

/// Statistical drift of the segment from the document's opening window:
/// type-token ratio plus mean sentence length, combined and saturated
fn opening_drift(text: &str, tokens: &[String], profile: &DocumentProfile) -> f64 {
    let distinct: HashSet<&str> = tokens.iter().map(|t| t.as_str()).collect();
    let ttr = distinct.len() as f64 / tokens.len() as f64;
    let msl = mean_sentence_len(text);
    let ttr_drift = (ttr - profile.opening.ttr).abs() * 1.5;
    let msl_drift = (msl - profile.opening.mean_sentence_len).abs() / 30.0;
    clamp01(ttr_drift + msl_drift)
}

/// Fraction of the segment's personal pronouns outside the document's
/// dominant person
fn person_drift(tokens: &[String], profile: &DocumentProfile) -> f64 {
    let Some(dominant) = profile.dominant_person else {
        return 0.0;
    };
    let pronouns: Vec<_> = tokens.iter().filter_map(|t| person_of(t)).collect();
    if pronouns.is_empty() {
        return 0.0;
    }
    let drifted = pronouns.iter().filter(|p| **p != dominant).count();
    clamp01(drifted as f64 / pronouns.len() as f64)
}

/// Normalized deviation of the segment's mean word length from the
/// document mean
fn register_shift(tokens: &[String], profile: &DocumentProfile) -> f64 {
    let mean = tokens.iter().map(|t| t.chars().count()).sum::<usize>() as f64 / tokens.len() as f64;
    clamp01((mean - profile.mean_word_len).abs() / 2.5)
}

/// Function-word excess over a prose baseline (~55% is unremarkable)
fn info_drought(tokens: &[String]) -> f64 {
    let function = tokens
        .iter()
        .filter(|t| FUNCTION_WORDS.contains(&t.as_str()))
        .count();
    let ratio = function as f64 / tokens.len() as f64;
    clamp01((ratio - 0.55) / 0.35)
}

/// 1 - word entropy over the maximum for the segment's word count
fn entropy_drop(tokens: &[String]) -> f64 {
    let n = tokens.len();
    if n < 2 {
        return 0.0;
    }
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    let entropy: f64 = counts
        .values()
        .map(|&c| {
            let p = c as f64 / n as f64;
            -p * p.log2()
        })
        .sum();
    clamp01(1.0 - entropy / (n as f64).log2())
}
