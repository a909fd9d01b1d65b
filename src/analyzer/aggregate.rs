//! Category aggregation: fixed weighted combinations of the 14 vectors.
//!
//! The weight table is static configuration data, not runtime logic, so
//! the mapping can be tuned and tested independently of extraction code.
//! Weights sum to 1 per category and every vector is non-negative, so the
//! aggregate stays in [0,1] by construction.

use crate::{Category, CategoryScore, Vector, VectorScore};

/// {category → {vector: weight}}; weights sum to 1.0 per category
pub const CATEGORY_WEIGHTS: &[(Category, &[(Vector, f64)])] = &[
    (
        Category::Repetition,
        &[
            (Vector::PhraseEcho, 0.50),
            (Vector::DuplicateSentences, 0.35),
            (Vector::WordRepetition, 0.10),
            (Vector::NgramRepetition, 0.05),
        ],
    ),
    (
        Category::Vagueness,
        &[
            (Vector::VagueReference, 0.35),
            (Vector::HedgingDensity, 0.25),
            (Vector::FillerDensity, 0.25),
            (Vector::InfoDrought, 0.15),
        ],
    ),
    (
        Category::IntentDecay,
        &[
            (Vector::OpeningDrift, 0.55),
            (Vector::InfoDrought, 0.25),
            (Vector::HedgingDensity, 0.20),
        ],
    ),
    (
        Category::ConfidenceInflation,
        &[
            (Vector::CertaintyDensity, 0.60),
            (Vector::FillerDensity, 0.25),
            (Vector::VagueReference, 0.15),
        ],
    ),
    (
        Category::VoiceDegradation,
        &[
            (Vector::PersonDrift, 0.45),
            (Vector::RegisterShift, 0.35),
            (Vector::SentenceUniformity, 0.20),
        ],
    ),
    (
        Category::EntropyCollapse,
        &[
            (Vector::EntropyDrop, 0.45),
            (Vector::WordRepetition, 0.20),
            (Vector::SentenceUniformity, 0.20),
            (Vector::NgramRepetition, 0.15),
        ],
    ),
];

/// Weight row for one category
pub fn weights_for(category: Category) -> &'static [(Vector, f64)] {
    CATEGORY_WEIGHTS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, weights)| *weights)
        .expect("weight table covers every category")
}

/// Map a segment's vectors to its six category scores
pub fn aggregate(vectors: &VectorScore) -> CategoryScore {
    let mut scores = CategoryScore::default();
    for (category, weights) in CATEGORY_WEIGHTS {
        let value: f64 = weights
            .iter()
            .map(|(vector, weight)| vectors.get(*vector) * weight)
            .sum();
        scores.set(*category, value.clamp(0.0, 1.0));
    }
    scores
}
