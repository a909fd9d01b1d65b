//! Word-boundary segmentation of a document.
//!
//! Segments are sized by proportional share of the word count, never by
//! bytes, so no segment splits a word and the concatenation of all
//! segments reconstructs the document exactly.

use crate::error::AnalysisError;
use regex::Regex;
use std::sync::OnceLock;

/// A contiguous slice of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Segment index (0-based)
    pub index: usize,
    /// Start byte offset in the document
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    pub text: &'a str,
}

/// Result of segmenting a document
#[derive(Debug, Clone)]
pub struct Segmentation<'a> {
    /// Segment count the caller asked for
    pub requested: usize,
    /// Segment count actually produced
    pub effective: usize,
    /// Total words in the document
    pub word_count: usize,
    pub segments: Vec<Segment<'a>>,
}

fn word_regex() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\w+(?:'\w+)*").expect("static pattern compiles"))
}

/// Lowercased word tokens of a text
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    word_regex()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Byte offsets of word starts
fn word_starts(content: &str) -> Vec<usize> {
    word_regex().find_iter(content).map(|m| m.start()).collect()
}

/// Word indices of the n-1 interior boundaries, each rounded to the
/// nearest proportional share. Strictly increasing for n <= word count.
fn boundaries(word_count: usize, n: usize) -> Vec<usize> {
    (1..n)
        .map(|i| ((i * word_count) as f64 / n as f64).round() as usize)
        .collect()
}

fn build_segments<'a>(content: &'a str, starts: &[usize], n: usize) -> Vec<Segment<'a>> {
    let cuts: Vec<usize> = boundaries(starts.len(), n)
        .into_iter()
        .map(|word_index| starts[word_index])
        .collect();

    let end = content.len();
    let mut segments = Vec::with_capacity(n);
    let mut begin = 0;
    for (index, &cut) in cuts.iter().chain(std::iter::once(&end)).enumerate() {
        segments.push(Segment {
            index,
            start: begin,
            end: cut,
            text: &content[begin..cut],
        });
        begin = cut;
    }
    segments
}

/// Split `content` into `requested` segments, clamping the count down to
/// the number of words when the document is too short. Fails only on
/// empty content or a zero segment count.
pub fn segment(content: &str, requested: usize) -> Result<Segmentation<'_>, AnalysisError> {
    match segment_exact(content, requested) {
        Ok(segmentation) => Ok(segmentation),
        Err(AnalysisError::InsufficientContent { available, .. }) => {
            let mut segmentation = segment_exact(content, available)?;
            segmentation.requested = requested;
            Ok(segmentation)
        }
        Err(other) => Err(other),
    }
}

/// Split `content` into exactly `requested` segments, failing with
/// `InsufficientContent` instead of clamping when the document has fewer
/// words than segments.
pub fn segment_exact(content: &str, requested: usize) -> Result<Segmentation<'_>, AnalysisError> {
    if requested == 0 {
        return Err(AnalysisError::InvalidConfiguration(
            "segment count must be at least 1".to_string(),
        ));
    }
    let starts = word_starts(content);
    if starts.is_empty() {
        return Err(AnalysisError::EmptyContent);
    }
    if requested > starts.len() {
        return Err(AnalysisError::InsufficientContent {
            requested,
            available: starts.len(),
        });
    }

    Ok(Segmentation {
        requested,
        effective: requested,
        word_count: starts.len(),
        segments: build_segments(content, &starts, requested),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstruct(segmentation: &Segmentation) -> String {
        segmentation.segments.iter().map(|s| s.text).collect()
    }

    #[test]
    fn round_trip_reconstructs_document() {
        let content = "The quick brown fox jumps over the lazy dog near the river bank today.";
        let segmentation = segment(content, 4).unwrap();
        assert_eq!(segmentation.effective, 4);
        assert_eq!(reconstruct(&segmentation), content);
    }

    #[test]
    fn segments_are_contiguous_and_ordered() {
        let content = "one two three four five six seven eight nine ten";
        let segmentation = segment(content, 3).unwrap();
        let mut expected_start = 0;
        for (i, seg) in segmentation.segments.iter().enumerate() {
            assert_eq!(seg.index, i);
            assert_eq!(seg.start, expected_start);
            expected_start = seg.end;
        }
        assert_eq!(expected_start, content.len());
    }

    #[test]
    fn no_segment_splits_a_word() {
        let content = "alpha beta gamma delta epsilon zeta eta theta";
        let segmentation = segment(content, 5).unwrap();
        for seg in &segmentation.segments[1..] {
            // every interior boundary lands on a word start
            let before = content.as_bytes()[seg.start - 1] as char;
            let at = content[seg.start..].chars().next().unwrap();
            assert!(!before.is_alphanumeric());
            assert!(at.is_alphanumeric());
        }
    }

    #[test]
    fn short_content_clamps_to_word_count() {
        let segmentation = segment("only three words", 20).unwrap();
        assert_eq!(segmentation.requested, 20);
        assert_eq!(segmentation.effective, 3);
        assert_eq!(segmentation.segments.len(), 3);
    }

    #[test]
    fn single_word_yields_one_segment() {
        let segmentation = segment("word", 20).unwrap();
        assert_eq!(segmentation.effective, 1);
        assert_eq!(segmentation.segments[0].text, "word");
    }

    #[test]
    fn exact_variant_reports_insufficient_content() {
        let err = segment_exact("only three words", 20).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InsufficientContent {
                requested: 20,
                available: 3
            }
        );
    }

    #[test]
    fn empty_content_is_an_error() {
        assert_eq!(segment("", 5).unwrap_err(), AnalysisError::EmptyContent);
        assert_eq!(
            segment("  ... !!! ???  ", 5).unwrap_err(),
            AnalysisError::EmptyContent
        );
    }

    #[test]
    fn zero_segments_is_an_error() {
        assert!(matches!(
            segment("some words here", 0).unwrap_err(),
            AnalysisError::InvalidConfiguration(_)
        ));
    }

    #[test]
    fn leading_and_trailing_whitespace_preserved() {
        let content = "  spaced out words here  ";
        let segmentation = segment(content, 2).unwrap();
        assert_eq!(reconstruct(&segmentation), content);
        assert_eq!(segmentation.segments[0].start, 0);
    }

    #[test]
    fn tokenize_lowercases_and_keeps_contractions() {
        let tokens = tokenize("It's DONE, isn't it?");
        assert_eq!(tokens, vec!["it's", "done", "isn't", "it"]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn round_trip_law(content in "[ a-zA-Z0-9.,!?\n]{1,400}", n in 1usize..40) {
                match segment(&content, n) {
                    Ok(segmentation) => {
                        prop_assert_eq!(reconstruct(&segmentation), content.clone());
                        prop_assert!(segmentation.effective >= 1);
                        prop_assert!(segmentation.effective <= n);
                        prop_assert_eq!(segmentation.segments.len(), segmentation.effective);
                    }
                    Err(AnalysisError::EmptyContent) => {
                        prop_assert!(tokenize(&content).is_empty());
                    }
                    Err(other) => return Err(TestCaseError::fail(format!("{other}"))),
                }
            }
        }
    }
}
