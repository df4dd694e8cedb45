//! Parsed rubric scores with the judge's improvement note.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Rubric;
use crate::domain::foundation::Score;

/// One complete scoring outcome: every rubric dimension scored 0-10, plus
/// the judge's one-line patch note when it offered one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSet {
    /// The rubric these scores were produced against.
    pub rubric: Rubric,
    /// Dimension name to score, keyed in canonical dimension order.
    pub scores: BTreeMap<String, Score>,
    /// The judge's suggested improvement, if any.
    pub patch_note: Option<String>,
}

impl ScoreSet {
    /// The score for a dimension, if present.
    pub fn get(&self, dimension: &str) -> Option<Score> {
        self.scores.get(dimension).copied()
    }

    /// Mean score across all dimensions (0.0 for an empty set).
    pub fn mean(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        let total: u32 = self.scores.values().map(|s| u32::from(s.value())).sum();
        f64::from(total) / self.scores.len() as f64
    }

    /// Dimensions scoring strictly below the threshold, lowest first.
    pub fn weak_dimensions(&self, threshold: Score) -> Vec<(&str, Score)> {
        let mut weak: Vec<(&str, Score)> = self
            .scores
            .iter()
            .filter(|(_, s)| **s < threshold)
            .map(|(name, s)| (name.as_str(), *s))
            .collect();
        weak.sort_by_key(|(_, s)| *s);
        weak
    }
}
