//! Stage 2 (Mind-Trace) exit rule.

use super::{require_field, StageRule, Verdict};
use crate::domain::foundation::Stage;
use crate::domain::patterns::{labeled_group, FieldSpec};

/// Minimum complete Pattern/Evidence/Confidence records.
pub const MIN_PATTERNS: usize = 2;

/// How many lines below a `Pattern N:` anchor its fields may sit.
pub const FIELD_WINDOW: usize = 6;

/// Accepted confidence levels.
pub const CONFIDENCE_LEVELS: [&str; 3] = ["High", "Medium", "Low"];

/// Stage 2 passes with at least two complete pattern records plus the
/// `Core Motivation:` and `Emotional Shift:` lines. A record missing its
/// `Confidence:` (or carrying an unrecognized level) does not count.
#[derive(Debug, Clone, Copy, Default)]
pub struct MindTraceRule;

impl StageRule for MindTraceRule {
    fn stage(&self) -> Stage {
        Stage::MindTrace
    }

    fn evaluate(&self, response: &str) -> Verdict {
        let fields = [
            FieldSpec::any("Evidence"),
            FieldSpec::one_of("Confidence", &CONFIDENCE_LEVELS),
        ];
        let groups = labeled_group(response, "Pattern", &fields, FIELD_WINDOW);

        let name = "Pattern records";
        let detail = format!(
            "{} complete record(s) of {} anchor(s) (need >={})",
            groups.complete, groups.anchors, MIN_PATTERNS
        );

        let builder = Verdict::builder(Stage::MindTrace)
            .advice(
                "Mind-Trace complete. Advance to Stage 3 (Signal Scan).",
                "Improve pattern documentation and emotional transition guidance.",
            )
            .trace(name, detail.clone())
            .mandatory(name, groups.meets(MIN_PATTERNS), detail);
        let builder = require_field(builder, response, "Core Motivation");
        let builder = require_field(builder, response, "Emotional Shift");
        builder.finish()
    }
}
