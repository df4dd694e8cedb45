//! Stage dispatch for exit-rule validation.

use std::collections::BTreeMap;

use tracing::debug;

use super::{SignalScanRule, StageRule, Verdict};
use super::{BrainDumpRule, ContextSeedRule, MetaReflectionRule, MindTraceRule, RapidPrototypeRule};
use crate::domain::foundation::{Stage, UnknownStageError};
use crate::domain::triggers::negative_constraints;

/// Routes a stage identifier plus an AI response to the registered rule.
///
/// The default engine covers every stage. Custom engines built from
/// [`ValidationEngine::empty`] may leave stages unregistered, in which
/// case validation reports the identifier as unknown.
pub struct ValidationEngine {
    rules: BTreeMap<Stage, Box<dyn StageRule>>,
}

impl ValidationEngine {
    /// An engine with all six stage rules registered.
    pub fn new() -> Self {
        Self::empty()
            .with_rule(Box::new(ContextSeedRule))
            .with_rule(Box::new(BrainDumpRule))
            .with_rule(Box::new(MindTraceRule))
            .with_rule(Box::new(SignalScanRule))
            .with_rule(Box::new(RapidPrototypeRule))
            .with_rule(Box::new(MetaReflectionRule))
    }

    /// An engine with no rules registered.
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Registers a rule under the stage it reports, replacing any previous
    /// registration for that stage.
    pub fn with_rule(mut self, rule: Box<dyn StageRule>) -> Self {
        self.rules.insert(rule.stage(), rule);
        self
    }

    /// Stages with a registered rule, in stage order.
    pub fn stages(&self) -> Vec<Stage> {
        self.rules.keys().copied().collect()
    }

    /// Validates a response against the given stage's exit rule.
    pub fn validate(&self, stage: Stage, response: &str) -> Result<Verdict, UnknownStageError> {
        let rule = self
            .rules
            .get(&stage)
            .ok_or_else(|| UnknownStageError::new(stage.to_string()))?;
        let verdict = rule.evaluate(response);
        debug!(
            stage = %stage,
            exit_rule_met = verdict.exit_rule_met,
            missing = ?verdict.missing(),
            "stage validated"
        );
        Ok(verdict)
    }

    /// Validates against a raw stage identifier ("0" through "5" or "meta").
    pub fn validate_id(&self, identifier: &str, response: &str) -> Result<Verdict, UnknownStageError> {
        let stage: Stage = identifier.parse()?;
        self.validate(stage, response)
    }

    /// Validates with the user's prompt in view.
    ///
    /// A Stage 3 prompt that declared negative constraints ("no advice",
    /// "only confirm") switches Signal Scan into adherence checking; every
    /// other stage validates exactly as [`ValidationEngine::validate`].
    pub fn validate_in_context(
        &self,
        stage: Stage,
        user_prompt: &str,
        response: &str,
    ) -> Result<Verdict, UnknownStageError> {
        if stage == Stage::SignalScan {
            let constraints = negative_constraints(user_prompt);
            if !constraints.is_empty() {
                debug!(?constraints, "signal scan under negative constraints");
                return Ok(SignalScanRule.evaluate_constrained(response));
            }
        }
        self.validate(stage, response)
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}
