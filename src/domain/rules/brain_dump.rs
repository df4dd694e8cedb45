//! Stage 1 (Brain Dump) exit rule.

use super::{StageRule, Verdict};
use crate::domain::foundation::Stage;
use crate::domain::patterns::list_after_label;

/// Minimum distinct themes the AI must surface from the raw dump.
pub const MIN_THEMES: usize = 3;

/// Stage 1 passes once a `Key Themes:` section lists at least three items,
/// in any supported bullet or numbering style.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrainDumpRule;

impl StageRule for BrainDumpRule {
    fn stage(&self) -> Stage {
        Stage::BrainDump
    }

    fn evaluate(&self, response: &str) -> Verdict {
        let name = "Key Themes list";
        let builder = Verdict::builder(Stage::BrainDump).advice(
            "Suggest advancing to Stage 2 (Mind-Trace).",
            "Improve theme identification.",
        );

        let (satisfied, detail) = match list_after_label(response, "Key Themes") {
            None => (false, "no 'Key Themes:' section found".to_string()),
            Some(block) => (
                block.meets(MIN_THEMES),
                format!(
                    "{} theme(s) under 'Key Themes:' (need >={})",
                    block.count(),
                    MIN_THEMES
                ),
            ),
        };

        builder
            .trace(name, detail.clone())
            .mandatory(name, satisfied, detail)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_bulleted_themes_meet_exit_rule() {
        let text = "Key Themes:\n- automation rituals\n- audience building\n- tiny tools";
        assert!(BrainDumpRule.evaluate(text).exit_rule_met);
    }

    #[test]
    fn numbered_themes_count_the_same() {
        let text = "**Key Themes:**\n1. automation rituals\n2) audience building\n3. tiny tools";
        assert!(BrainDumpRule.evaluate(text).exit_rule_met);
    }

    #[test]
    fn two_themes_are_not_enough() {
        let text = "Key Themes:\n- automation rituals\n- audience building";
        let verdict = BrainDumpRule.evaluate(text);
        assert!(!verdict.exit_rule_met);
        assert!(verdict.requirements[0].detail.contains("2 theme(s)"));
    }

    #[test]
    fn missing_section_fails_with_explanation() {
        let text = "I noticed several themes: automation, audience, and tools.";
        let verdict = BrainDumpRule.evaluate(text);
        assert!(!verdict.exit_rule_met);
        assert!(verdict.requirements[0].detail.contains("no 'Key Themes:'"));
    }

    #[test]
    fn themes_in_a_later_section_do_not_count() {
        let text = "Key Themes:\n\n- only one\n\nOther notes:\n- stray\n- stray\n- stray";
        assert!(!BrainDumpRule.evaluate(text).exit_rule_met);
    }
}
