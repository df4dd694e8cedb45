//! Scoring rubrics and their judge prompt blocks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One scored dimension with the question the judge answers for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RubricDimension {
    pub name: &'static str,
    pub prompt: &'static str,
}

/// Dimensions for ordinary stage responses.
pub const STANDARD_DIMENSIONS: [RubricDimension; 5] = [
    RubricDimension {
        name: "clarity",
        prompt: "Is the response easy to understand, with no ambiguity about what happens next?",
    },
    RubricDimension {
        name: "stage_alignment",
        prompt: "Does the response follow the current stage's directive and output format?",
    },
    RubricDimension {
        name: "tone",
        prompt: "Is the tone supportive and energizing rather than clinical or dismissive?",
    },
    RubricDimension {
        name: "utility",
        prompt: "Does the response move the user measurably closer to a buildable outcome?",
    },
    RubricDimension {
        name: "empathy",
        prompt: "Does the response acknowledge the user's emotional state where it shows?",
    },
];

/// Dimensions for Meta-Mode reflections.
pub const META_DIMENSIONS: [RubricDimension; 3] = [
    RubricDimension {
        name: "insight_clarity",
        prompt: "Does the reflection name specific, understandable insights about the dialogue?",
    },
    RubricDimension {
        name: "emotional_resonance",
        prompt: "Does the reflection connect observations to how the exchange actually felt?",
    },
    RubricDimension {
        name: "actionability",
        prompt: "Do the refinements translate into concrete next-session changes?",
    },
];

/// Which dimension set a score set was produced against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rubric {
    /// Five-dimension rubric for ordinary stage responses.
    Standard,
    /// Three-dimension rubric for Meta-Mode reflections.
    Meta,
}

impl Rubric {
    /// Selects the rubric for a response kind.
    pub fn for_meta(is_meta: bool) -> Self {
        if is_meta {
            Rubric::Meta
        } else {
            Rubric::Standard
        }
    }

    /// The dimensions scored under this rubric, in canonical order.
    pub fn dimensions(&self) -> &'static [RubricDimension] {
        match self {
            Rubric::Standard => &STANDARD_DIMENSIONS,
            Rubric::Meta => &META_DIMENSIONS,
        }
    }

    /// Builds the judge's system prompt for this rubric.
    ///
    /// The reply contract is spelled out verbatim so the payload parser can
    /// rely on a `scores` object and a `patch_note` string.
    pub fn prompt_block(&self) -> String {
        let mut block = String::from(
            "You are a strict evaluator. Score the response from 0 to 10 on each dimension:\n",
        );
        for dim in self.dimensions() {
            block.push_str(&format!("- {}: {}\n", dim.name, dim.prompt));
        }
        block.push_str("Return ONLY json: {\"scores\": {");
        let mut first = true;
        for dim in self.dimensions() {
            if !first {
                block.push_str(", ");
            }
            block.push_str(&format!("\"{}\": 0-10", dim.name));
            first = false;
        }
        block.push_str("}, \"patch_note\": \"one sentence on what to improve\"}");
        block
    }
}

impl fmt::Display for Rubric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rubric::Standard => write!(f, "standard"),
            Rubric::Meta => write!(f, "meta"),
        }
    }
}
