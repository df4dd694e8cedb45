//! Stage 0 (Context Seed) exit rule.

use super::{require_field, StageRule, Verdict};
use crate::domain::foundation::Stage;

/// Stage 0 passes once the 30-second litmus test is restated: both the
/// `Success Today:` and `Primary Constraint:` lines must carry content.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextSeedRule;

impl StageRule for ContextSeedRule {
    fn stage(&self) -> Stage {
        Stage::ContextSeed
    }

    fn evaluate(&self, response: &str) -> Verdict {
        let builder = Verdict::builder(Stage::ContextSeed).advice(
            "Context seeded. Suggest advancing to Stage 1 (Brain Dump).",
            "Clarify 'Success Today' and 'Primary Constraint'.",
        );
        let builder = require_field(builder, response, "Success Today");
        let builder = require_field(builder, response, "Primary Constraint");
        builder.finish()
    }
}
