//! Rubric scoring through an AI judge.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::payload::{extract_object, ParseMethod};
use super::{Rubric, ScoreSet};
use crate::domain::foundation::{Score, Stage};
use crate::ports::{Judge, JudgeError, JudgeRequest};

/// Why a judge reply could not be turned into a score set.
///
/// Every variant carries the raw reply so callers can log or retry with
/// full context. A failed parse never degrades into silent zero scores.
#[derive(Debug, Error)]
pub enum ScoreParseError {
    #[error("no JSON object found in judge reply")]
    NoJsonObject { raw: String },

    #[error("judge reply has no scores for rubric '{rubric}'")]
    MissingScores { rubric: Rubric, raw: String },

    #[error("judge reply is missing dimension '{dimension}'")]
    MissingDimension { dimension: String, raw: String },

    #[error("dimension '{dimension}' is not numeric")]
    NonNumeric { dimension: String, raw: String },
}

/// Failures of one scoring call.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("judge call failed: {0}")]
    Judge(#[from] JudgeError),

    #[error("judge reply unusable: {0}")]
    Parse(#[from] ScoreParseError),
}

/// Scores AI responses against a rubric by delegating to a judge.
///
/// The scorer owns prompt construction and reply parsing; the judge only
/// moves text. Swapping backends means swapping the `J` parameter.
pub struct RubricScorer<J: Judge> {
    judge: J,
}

impl<J: Judge> RubricScorer<J> {
    pub fn new(judge: J) -> Self {
        Self { judge }
    }

    /// Scores a response under the rubric selected by `is_meta`.
    pub async fn score(&self, text: &str, is_meta: bool) -> Result<ScoreSet, ScoreError> {
        let rubric = Rubric::for_meta(is_meta);
        let request = JudgeRequest::new(rubric.prompt_block(), text);
        let reply = self.judge.evaluate(request).await?;
        let set = parse_score_set(rubric, &reply).map_err(|err| {
            warn!(%err, "judge reply unusable");
            err
        })?;
        debug!(rubric = %rubric, mean = set.mean(), "response scored");
        Ok(set)
    }

    /// Scores a response with the originating exchange in the judge's view.
    ///
    /// The user prompt is included so stage-alignment and empathy can be
    /// judged against what was actually asked.
    pub async fn score_for_stage(
        &self,
        stage: Stage,
        user_prompt: &str,
        text: &str,
        is_meta: bool,
    ) -> Result<ScoreSet, ScoreError> {
        let rubric = Rubric::for_meta(is_meta);
        let system_prompt = format!(
            "{}\n\nThe response was produced for {}.",
            rubric.prompt_block(),
            stage
        );
        let user_content = format!("User prompt:\n{}\n\nResponse under evaluation:\n{}", user_prompt, text);
        let reply = self
            .judge
            .evaluate(JudgeRequest::new(system_prompt, user_content))
            .await?;
        let set = parse_score_set(rubric, &reply).map_err(|err| {
            warn!(stage = %stage, %err, "judge reply unusable");
            err
        })?;
        debug!(stage = %stage, rubric = %rubric, mean = set.mean(), "stage response scored");
        Ok(set)
    }
}

/// Parses a raw judge reply into a complete score set for the rubric.
///
/// Accepts scores under a `scores` key or at the top level, as integers,
/// floats (rounded to nearest), or numeric strings. Out-of-range values
/// clamp to 0-10.
pub fn parse_score_set(rubric: Rubric, reply: &str) -> Result<ScoreSet, ScoreParseError> {
    let (value, method) = extract_object(reply).ok_or_else(|| ScoreParseError::NoJsonObject {
        raw: reply.to_string(),
    })?;
    if method != ParseMethod::Direct {
        debug!(?method, "judge payload recovered indirectly");
    }

    let scores_obj = match value.get("scores") {
        Some(Value::Object(map)) => map.clone(),
        Some(_) | None => match &value {
            // Tolerate a flat reply that skipped the scores wrapper.
            Value::Object(map) if rubric.dimensions().iter().any(|d| map.contains_key(d.name)) => {
                map.clone()
            }
            _ => {
                return Err(ScoreParseError::MissingScores {
                    rubric,
                    raw: reply.to_string(),
                })
            }
        },
    };

    let mut scores = BTreeMap::new();
    for dim in rubric.dimensions() {
        let raw_score = scores_obj
            .get(dim.name)
            .ok_or_else(|| ScoreParseError::MissingDimension {
                dimension: dim.name.to_string(),
                raw: reply.to_string(),
            })?;
        let numeric = as_numeric(raw_score).ok_or_else(|| ScoreParseError::NonNumeric {
            dimension: dim.name.to_string(),
            raw: reply.to_string(),
        })?;
        scores.insert(dim.name.to_string(), Score::from_f64(numeric));
    }

    let patch_note = value
        .get("patch_note")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(ScoreSet {
        rubric,
        scores,
        patch_note,
    })
}

fn as_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
