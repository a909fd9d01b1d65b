//! Read-only document-wide context, computed once before per-segment
//! extraction.
//!
//! Context-dependent vectors (phrase echo, duplicate sentences, person
//! drift, register shift, opening drift) read this profile and nothing
//! else, so per-segment results cannot depend on execution order.

use crate::segmenter::tokenize;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Grammatical person of a personal pronoun
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Person {
    First,
    Second,
    Third,
}

pub(crate) fn person_of(token: &str) -> Option<Person> {
    match token {
        "i" | "we" | "me" | "us" | "my" | "our" | "mine" | "ours" | "myself" | "ourselves" => {
            Some(Person::First)
        }
        "you" | "your" | "yours" | "yourself" | "yourselves" => Some(Person::Second),
        "he" | "she" | "they" | "it" | "him" | "her" | "them" | "his" | "hers" | "its"
        | "their" | "theirs" | "himself" | "herself" | "itself" | "themselves" => {
            Some(Person::Third)
        }
        _ => None,
    }
}

fn sentence_end() -> &'static Regex {
    static END: OnceLock<Regex> = OnceLock::new();
    END.get_or_init(|| Regex::new(r"[.!?]+").expect("static pattern compiles"))
}

/// Sentence chunks of a text: split on terminal punctuation runs, trimmed,
/// chunks without any word character dropped. Text with no terminator is a
/// single sentence.
pub(crate) fn sentences(text: &str) -> Vec<&str> {
    sentence_end()
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().any(|c| c.is_alphanumeric()))
        .collect()
}

/// Canonical form for verbatim-duplicate detection: lowercased, inner
/// whitespace collapsed
pub(crate) fn normalize_sentence(sentence: &str) -> String {
    sentence.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Word trigrams of a token sequence, space-joined
pub(crate) fn trigrams(tokens: &[String]) -> Vec<String> {
    tokens.windows(3).map(|w| w.join(" ")).collect()
}

pub(crate) fn count_into<I: IntoIterator<Item = String>>(items: I) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

/// Mean sentence length (in words) of a text fragment
pub(crate) fn mean_sentence_len(text: &str) -> f64 {
    let sentence_lens: Vec<usize> = sentences(text)
        .iter()
        .map(|s| tokenize(s).len())
        .filter(|&n| n > 0)
        .collect();
    if sentence_lens.is_empty() {
        return 0.0;
    }
    sentence_lens.iter().sum::<usize>() as f64 / sentence_lens.len() as f64
}

/// Statistical profile of the document opening window
#[derive(Debug, Clone)]
pub(crate) struct OpeningProfile {
    /// Type-token ratio over the opening words
    pub ttr: f64,
    /// Mean sentence length (words) over the opening sentences
    pub mean_sentence_len: f64,
}

/// Immutable document-wide statistics shared by all segments
#[derive(Debug)]
pub struct DocumentProfile {
    /// Occurrence count of every word trigram in the document
    pub(crate) trigram_counts: HashMap<String, usize>,
    /// Occurrence count of every normalized sentence in the document
    pub(crate) sentence_counts: HashMap<String, usize>,
    /// Most frequent pronoun person, when the document uses pronouns at all
    pub(crate) dominant_person: Option<Person>,
    /// Mean word length (chars) across the document
    pub(crate) mean_word_len: f64,
    pub(crate) opening: OpeningProfile,
}

impl DocumentProfile {
    pub fn build(content: &str) -> Self {
        let tokens = tokenize(content);

        let trigram_counts = count_into(trigrams(&tokens));
        let sentence_counts = count_into(sentences(content).iter().map(|s| normalize_sentence(s)));

        let mut person_counts = [0usize; 3];
        for token in &tokens {
            if let Some(person) = person_of(token) {
                person_counts[person as usize] += 1;
            }
        }
        let dominant_person = [Person::First, Person::Second, Person::Third]
            .into_iter()
            .max_by_key(|p| person_counts[*p as usize])
            .filter(|p| person_counts[*p as usize] > 0);

        let mean_word_len = if tokens.is_empty() {
            0.0
        } else {
            tokens.iter().map(|t| t.chars().count()).sum::<usize>() as f64 / tokens.len() as f64
        };

        let opening = Self::opening_profile(content, &tokens);

        Self {
            trigram_counts,
            sentence_counts,
            dominant_person,
            mean_word_len,
            opening,
        }
    }

    /// Profile the first tenth of the document (at least 25 words, at most
    /// all of it): the stylistic baseline later segments are compared to.
    fn opening_profile(content: &str, tokens: &[String]) -> OpeningProfile {
        let window = tokens.len().min(25.max(tokens.len() / 10));
        let opening_tokens = &tokens[..window];

        let distinct: std::collections::HashSet<&str> =
            opening_tokens.iter().map(|t| t.as_str()).collect();
        let ttr = if opening_tokens.is_empty() {
            0.0
        } else {
            distinct.len() as f64 / opening_tokens.len() as f64
        };

        // opening sentences: take sentences until the window is covered
        let mut covered = 0usize;
        let mut lens: Vec<usize> = Vec::new();
        for sentence in sentences(content) {
            let n = tokenize(sentence).len();
            if n == 0 {
                continue;
            }
            lens.push(n);
            covered += n;
            if covered >= window {
                break;
            }
        }
        let mean_sentence_len = if lens.is_empty() {
            0.0
        } else {
            lens.iter().sum::<usize>() as f64 / lens.len() as f64
        };

        OpeningProfile {
            ttr,
            mean_sentence_len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentences_split_on_terminal_punctuation() {
        let text = "First one. Second one! Third one? And a trailing fragment";
        let result = sentences(text);
        assert_eq!(
            result,
            vec!["First one", "Second one", "Third one", "And a trailing fragment"]
        );
    }

    #[test]
    fn sentences_ignore_punctuation_only_chunks() {
        assert!(sentences("...!!!???").is_empty());
        assert_eq!(sentences("no terminator at all"), vec!["no terminator at all"]);
    }

    #[test]
    fn normalize_sentence_collapses_whitespace_and_case() {
        assert_eq!(
            normalize_sentence("  The   QUICK fox  "),
            "the quick fox"
        );
    }

    #[test]
    fn trigram_counts_cover_whole_document() {
        let profile = DocumentProfile::build("a b c d a b c");
        assert_eq!(profile.trigram_counts.get("a b c"), Some(&2));
        assert_eq!(profile.trigram_counts.get("b c d"), Some(&1));
        assert_eq!(profile.trigram_counts.get("c d a"), Some(&1));
    }

    #[test]
    fn dominant_person_picks_most_frequent_class() {
        let profile = DocumentProfile::build("We built the bridge. We tested it. We opened our gates.");
        assert_eq!(profile.dominant_person, Some(Person::First));
    }

    #[test]
    fn no_pronouns_means_no_dominant_person() {
        let profile = DocumentProfile::build("Rust compiles fast code.");
        assert_eq!(profile.dominant_person, None);
    }

    #[test]
    fn duplicate_sentence_counting_is_normalized() {
        let profile = DocumentProfile::build("The same line. the  SAME line. A different line.");
        assert_eq!(profile.sentence_counts.get("the same line"), Some(&2));
        assert_eq!(profile.sentence_counts.get("a different line"), Some(&1));
    }

    #[test]
    fn opening_profile_of_uniform_text_matches_segments() {
        let content = "alpha beta gamma delta. ".repeat(30);
        let profile = DocumentProfile::build(&content);
        assert_eq!(profile.opening.mean_sentence_len, 4.0);
        // 4 distinct words throughout, window far larger than 4
        assert!(profile.opening.ttr < 0.5);
    }
}
