//! Rubric scoring of AI responses.
//!
//! Judged scores come from [`RubricScorer`] through the [`crate::ports::Judge`]
//! capability; [`estimate`] offers an explicitly low-confidence fallback
//! that never masquerades as a judged result.

mod heuristic;
mod payload;
mod rubric;
mod score_set;
mod scorer;

pub use heuristic::{estimate, HeuristicEstimate};
pub use payload::{extract_object, ParseMethod};
pub use rubric::{Rubric, RubricDimension, META_DIMENSIONS, STANDARD_DIMENSIONS};
pub use score_set::ScoreSet;
pub use scorer::{parse_score_set, RubricScorer, ScoreError, ScoreParseError};
