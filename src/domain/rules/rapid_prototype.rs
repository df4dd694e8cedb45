//! Stage 4 (Rapid Prototyping) exit rule.

use super::{require_field, StageRule, Verdict};
use crate::domain::foundation::Stage;
use crate::domain::patterns::list_after_label;

/// Stage 4 passes once all four build-plan sections are present, in any
/// order: `Prototype Goal:`, a `Won't Build List:` with at least one item,
/// `Functional Checkpoint:`, and `Declare Completion:`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RapidPrototypeRule;

impl StageRule for RapidPrototypeRule {
    fn stage(&self) -> Stage {
        Stage::RapidPrototype
    }

    fn evaluate(&self, response: &str) -> Verdict {
        let builder = Verdict::builder(Stage::RapidPrototype).advice(
            "Prototype plan valid. Start building and test.",
            "Complete missing Stage 4 sections.",
        );
        let builder = require_field(builder, response, "Prototype Goal");

        let name = "Won't Build List";
        let (satisfied, detail) = match list_after_label(response, "Won't Build List") {
            Some(block) if block.count() > 0 => (
                true,
                format!("{} exclusion(s) under 'Won't Build List:'", block.count()),
            ),
            // Inline prose after the label is not a list; at least one
            // actual item is required.
            Some(_) => (false, "'Won't Build List:' found but no list items".to_string()),
            None => (false, "no 'Won't Build List:' section found".to_string()),
        };
        let builder = builder
            .trace(name, detail.clone())
            .mandatory(name, satisfied, detail);

        let builder = require_field(builder, response, "Functional Checkpoint");
        let builder = require_field(builder, response, "Declare Completion");
        builder.finish()
    }
}
