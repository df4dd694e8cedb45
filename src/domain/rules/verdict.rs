//! Exit-rule verdicts and per-requirement detail.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::Stage;

/// One named sub-check within a stage's exit rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Human-readable requirement name (e.g. "Success Today").
    pub name: String,
    /// Whether a valid occurrence was found.
    pub satisfied: bool,
    /// Optional requirements never gate the verdict.
    pub mandatory: bool,
    /// What was (or was not) found, with counts where relevant.
    pub detail: String,
}

/// The structured pass/fail result of one exit-rule evaluation.
///
/// Created fresh per validation call and never mutated afterwards.
/// `exit_rule_met` holds iff every mandatory requirement is satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// The stage this verdict was evaluated against.
    pub stage: Stage,
    /// True iff all mandatory requirements are satisfied.
    pub exit_rule_met: bool,
    /// Requirements in evaluation order.
    pub requirements: Vec<Requirement>,
    /// Per-requirement trace strings, for caller-side logging only.
    pub debug: BTreeMap<String, String>,
    /// One-line outcome summary naming any missing pieces.
    pub summary: String,
    /// Stage-specific guidance for the caller's next prompt.
    pub advice: String,
}

impl Verdict {
    /// Starts building a verdict for the given stage.
    pub fn builder(stage: Stage) -> VerdictBuilder {
        VerdictBuilder {
            stage,
            requirements: Vec::new(),
            debug: BTreeMap::new(),
            advice_met: String::new(),
            advice_not_met: String::new(),
        }
    }

    /// Names of unsatisfied mandatory requirements, in order.
    pub fn missing(&self) -> Vec<&str> {
        self.requirements
            .iter()
            .filter(|r| r.mandatory && !r.satisfied)
            .map(|r| r.name.as_str())
            .collect()
    }

    /// Fraction of mandatory requirements satisfied (1.0 when there are none).
    pub fn mandatory_ratio(&self) -> f32 {
        let mandatory: Vec<_> = self.requirements.iter().filter(|r| r.mandatory).collect();
        if mandatory.is_empty() {
            return 1.0;
        }
        let satisfied = mandatory.iter().filter(|r| r.satisfied).count();
        satisfied as f32 / mandatory.len() as f32
    }
}

/// Incremental verdict assembly used by the stage rules.
#[derive(Debug)]
pub struct VerdictBuilder {
    stage: Stage,
    requirements: Vec<Requirement>,
    debug: BTreeMap<String, String>,
    advice_met: String,
    advice_not_met: String,
}

impl VerdictBuilder {
    /// Records a mandatory requirement.
    pub fn mandatory(
        mut self,
        name: impl Into<String>,
        satisfied: bool,
        detail: impl Into<String>,
    ) -> Self {
        self.requirements.push(Requirement {
            name: name.into(),
            satisfied,
            mandatory: true,
            detail: detail.into(),
        });
        self
    }

    /// Records an optional, non-gating requirement.
    pub fn optional(
        mut self,
        name: impl Into<String>,
        satisfied: bool,
        detail: impl Into<String>,
    ) -> Self {
        self.requirements.push(Requirement {
            name: name.into(),
            satisfied,
            mandatory: false,
            detail: detail.into(),
        });
        self
    }

    /// Adds a trace entry under the given requirement name.
    pub fn trace(mut self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.debug.insert(name.into(), message.into());
        self
    }

    /// Sets the advice strings attached for the met / not-met outcomes.
    pub fn advice(mut self, met: impl Into<String>, not_met: impl Into<String>) -> Self {
        self.advice_met = met.into();
        self.advice_not_met = not_met.into();
        self
    }

    /// Computes the aggregate outcome and freezes the verdict.
    pub fn finish(self) -> Verdict {
        let missing: Vec<&str> = self
            .requirements
            .iter()
            .filter(|r| r.mandatory && !r.satisfied)
            .map(|r| r.name.as_str())
            .collect();
        let exit_rule_met = missing.is_empty();

        let summary = if exit_rule_met {
            format!("{} exit rule met", self.stage)
        } else {
            format!("{} exit rule not met - missing: {}", self.stage, missing.join(", "))
        };
        let advice = if exit_rule_met {
            self.advice_met.clone()
        } else {
            self.advice_not_met.clone()
        };

        Verdict {
            stage: self.stage,
            exit_rule_met,
            requirements: self.requirements,
            debug: self.debug,
            summary,
            advice,
        }
    }
}
