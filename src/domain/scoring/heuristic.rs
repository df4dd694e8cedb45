//! Judge-free score estimation from surface features.
//!
//! When no judge is reachable, callers may fall back to this estimate. It
//! is a separate type from [`super::ScoreSet`] on purpose: a heuristic
//! guess must never be mistaken for a judged score downstream.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Score;
use crate::domain::rules::Verdict;

/// Labeled fields, bullets, and headings all count as structure.
static STRUCTURE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:#{1,6}\s+\S|[-*]\s+\S|\d{1,3}[.)]\s+\S|[A-Za-z][A-Za-z '\x{2019}-]*:\s*\S)")
        .expect("structure regex is valid")
});

/// A rough, judge-free quality estimate for one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicEstimate {
    /// Length-based readability estimate.
    pub clarity: Score,
    /// Structure-density estimate of practical usefulness.
    pub utility: Score,
    /// Exit-rule coverage mapped onto the 0-10 scale.
    pub stage_alignment: Score,
    /// Fraction of mandatory requirements satisfied, as a score.
    pub completeness: Score,
    /// Always "low"; estimates carry no judge signal.
    pub confidence: String,
    /// One line explaining how the estimate was derived.
    pub note: String,
}

/// Estimates response quality from the validation verdict and raw text.
pub fn estimate(verdict: &Verdict, response: &str) -> HeuristicEstimate {
    let words = response.split_whitespace().count();
    let clarity = clarity_from_length(words);

    let structure_hits = STRUCTURE_RE.find_iter(response).count();
    let utility = Score::new(4 + (structure_hits.min(6) as u8));

    let ratio = verdict.mandatory_ratio();
    let completeness = Score::from_f64(f64::from(ratio) * 10.0);
    let stage_alignment = if verdict.exit_rule_met {
        Score::new(8)
    } else {
        Score::from_f64(f64::from(ratio) * 6.0)
    };

    HeuristicEstimate {
        clarity,
        utility,
        stage_alignment,
        completeness,
        confidence: "low".to_string(),
        note: format!(
            "estimated from {} word(s), {} structure line(s), {:.0}% mandatory coverage",
            words,
            structure_hits,
            ratio * 100.0
        ),
    }
}

/// Very short replies read as thin, very long ones as rambling.
fn clarity_from_length(words: usize) -> Score {
    match words {
        0..=9 => Score::new(2),
        10..=19 => Score::new(4),
        20..=250 => Score::new(7),
        251..=400 => Score::new(6),
        _ => Score::new(4),
    }
}
