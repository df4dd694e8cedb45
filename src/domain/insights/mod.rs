//! Interaction records and cross-session insight tracking.
//!
//! Each validated-and-scored exchange becomes one [`InteractionRecord`].
//! The [`InsightTracker`] folds records into running signals (completion
//! rates, stuck points, score trends) and turns them into concrete
//! framework-tuning suggestions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::{Stage, Timestamp};
use crate::domain::rules::Verdict;
use crate::domain::scoring::ScoreSet;
use crate::domain::triggers::EmotionalState;

/// Utility below this marks the exchange as a stuck point.
const STUCK_UTILITY_THRESHOLD: u8 = 4;

/// Exponential moving average weight on history (new observations get 0.1).
const EWMA_HISTORY_WEIGHT: f64 = 0.9;

/// One fully processed dialogue exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub id: Uuid,
    pub timestamp: Timestamp,
    pub stage: Stage,
    pub user_prompt: String,
    pub ai_response: String,
    pub exit_rule_met: bool,
    /// Judged scores, absent when no judge was reachable.
    pub scores: Option<ScoreSet>,
    pub patch_note: Option<String>,
    pub is_meta: bool,
}

impl InteractionRecord {
    /// Builds a record from one exchange and its validation verdict.
    pub fn new(
        user_prompt: impl Into<String>,
        ai_response: impl Into<String>,
        verdict: &Verdict,
        scores: Option<ScoreSet>,
    ) -> Self {
        let patch_note = scores.as_ref().and_then(|s| s.patch_note.clone());
        Self {
            id: Uuid::new_v4(),
            timestamp: Timestamp::now(),
            stage: verdict.stage,
            user_prompt: user_prompt.into(),
            ai_response: ai_response.into(),
            exit_rule_met: verdict.exit_rule_met,
            scores,
            patch_note,
            is_meta: verdict.stage.is_meta(),
        }
    }
}

/// Running cross-session signals, updated one record at a time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsightTracker {
    /// Smoothed exit-rule pass rate per stage.
    completion_rates: BTreeMap<Stage, f64>,
    /// Exchanges per stage whose utility scored below threshold.
    stuck_points: BTreeMap<Stage, u32>,
    /// Score history per dimension, in arrival order.
    score_history: BTreeMap<String, Vec<u8>>,
    /// Overwhelm episodes per named emotional state.
    emotional_states: BTreeMap<String, u32>,
    interactions: u64,
}

impl InsightTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one interaction into the running signals.
    pub fn record(&mut self, record: &InteractionRecord) {
        self.interactions += 1;

        let observed = if record.exit_rule_met { 1.0 } else { 0.0 };
        let rate = self
            .completion_rates
            .entry(record.stage)
            .or_insert(observed);
        *rate = EWMA_HISTORY_WEIGHT * *rate + (1.0 - EWMA_HISTORY_WEIGHT) * observed;

        if let Some(scores) = &record.scores {
            for (dimension, score) in &scores.scores {
                self.score_history
                    .entry(dimension.clone())
                    .or_default()
                    .push(score.value());
            }
            if let Some(utility) = scores.get("utility") {
                if utility.value() < STUCK_UTILITY_THRESHOLD {
                    *self.stuck_points.entry(record.stage).or_insert(0) += 1;
                }
            }
        }
    }

    /// Counts one overwhelm episode against its named state.
    pub fn record_overwhelm(&mut self, state: EmotionalState) {
        *self
            .emotional_states
            .entry(state.label().to_string())
            .or_insert(0) += 1;
    }

    /// Total interactions recorded so far.
    pub fn interactions(&self) -> u64 {
        self.interactions
    }

    /// The smoothed pass rate for a stage, if any exchange touched it.
    pub fn completion_rate(&self, stage: Stage) -> Option<f64> {
        self.completion_rates.get(&stage).copied()
    }

    /// Snapshot of the signals as actionable suggestions.
    pub fn report(&self) -> InsightReport {
        let struggling_stages: Vec<Stage> = self
            .completion_rates
            .iter()
            .filter(|(_, rate)| **rate < 0.5)
            .map(|(stage, _)| *stage)
            .collect();

        let declining_dimensions: Vec<String> = self
            .score_history
            .iter()
            .filter(|(_, history)| is_declining(history))
            .map(|(dimension, _)| dimension.clone())
            .collect();

        let dominant_emotional_state = self
            .emotional_states
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(label, _)| label.clone());

        let mut suggested_updates = Vec::new();
        for stage in &struggling_stages {
            suggested_updates.push(format!(
                "{} pass rate is below 50%; simplify its directive or add an example",
                stage
            ));
        }
        for (stage, count) in &self.stuck_points {
            if *count >= 2 {
                suggested_updates.push(format!(
                    "{} produced {} low-utility exchange(s); tighten its output contract",
                    stage, count
                ));
            }
        }
        for dimension in &declining_dimensions {
            suggested_updates.push(format!(
                "'{}' scores are trending down; revisit the prompt language it measures",
                dimension
            ));
        }
        if let Some(state) = &dominant_emotional_state {
            suggested_updates.push(format!(
                "'{}' is the most frequent overwhelm state; lead with its resize strategy",
                state
            ));
        }

        InsightReport {
            interactions: self.interactions,
            struggling_stages,
            stuck_points: self.stuck_points.clone(),
            declining_dimensions,
            dominant_emotional_state,
            suggested_updates,
        }
    }
}

/// Mean of the last three observations sits below the mean of the first three.
fn is_declining(history: &[u8]) -> bool {
    if history.len() < 6 {
        return false;
    }
    let head: f64 = history[..3].iter().map(|v| f64::from(*v)).sum::<f64>() / 3.0;
    let tail: f64 = history[history.len() - 3..]
        .iter()
        .map(|v| f64::from(*v))
        .sum::<f64>()
        / 3.0;
    tail + 0.5 < head
}

/// One snapshot of accumulated signals with suggested framework updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    pub interactions: u64,
    /// Stages whose smoothed pass rate fell below one half.
    pub struggling_stages: Vec<Stage>,
    /// Low-utility exchange counts per stage.
    pub stuck_points: BTreeMap<Stage, u32>,
    /// Dimensions whose recent scores dropped against their early scores.
    pub declining_dimensions: Vec<String>,
    pub dominant_emotional_state: Option<String>,
    pub suggested_updates: Vec<String>,
}
