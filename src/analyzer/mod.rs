//! Analysis pipeline: document profile, vector extraction, category
//! aggregation, severity classification.

pub mod aggregate;
pub mod context;
pub mod engine;
pub mod severity;
pub mod vectors;

pub use context::DocumentProfile;
pub use engine::BeatMapAnalyzer;
