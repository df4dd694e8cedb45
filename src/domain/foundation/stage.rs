//! Workflow stages of the Ideate-to-Create dialogue.
//!
//! Stages select which exit rule and rubric apply to an AI response.
//! Unlike conversation lifecycle state (owned by the caller), a stage is
//! an immutable identifier attached to each validation call.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::UnknownStageError;

/// A stage in the ideation workflow, each with its own exit criteria.
///
/// The numbered stages flow in order; `Meta` is a reflective side-conversation
/// state with its own exit content-blocks and its own rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Stage 0: seed the creator's context (identity, goal, constraint).
    ContextSeed,

    /// Stage 1: raw idea dump, distilled into key themes.
    BrainDump,

    /// Stage 2: trace thought patterns, motivation, and emotional shift.
    MindTrace,

    /// Stage 3: scan for the one idea with a winning signal.
    SignalScan,

    /// Stage 4: plan and build a minimum viable prototype.
    RapidPrototype,

    /// Meta-mode: the dialogue reflects on the framework itself.
    Meta,
}

impl Stage {
    /// All defined stages, in workflow order.
    pub const ALL: [Stage; 6] = [
        Stage::ContextSeed,
        Stage::BrainDump,
        Stage::MindTrace,
        Stage::SignalScan,
        Stage::RapidPrototype,
        Stage::Meta,
    ];

    /// Returns the stage number for numbered stages, `None` for meta.
    pub fn number(&self) -> Option<u8> {
        match self {
            Stage::ContextSeed => Some(0),
            Stage::BrainDump => Some(1),
            Stage::MindTrace => Some(2),
            Stage::SignalScan => Some(3),
            Stage::RapidPrototype => Some(4),
            Stage::Meta => None,
        }
    }

    /// Returns a short label for the stage, suitable for UI display.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::ContextSeed => "Context Seed",
            Stage::BrainDump => "Brain Dump",
            Stage::MindTrace => "Mind-Trace",
            Stage::SignalScan => "Signal Scan",
            Stage::RapidPrototype => "Rapid Prototyping",
            Stage::Meta => "Meta-Mode",
        }
    }

    /// Returns true for the reflective meta stage.
    pub fn is_meta(&self) -> bool {
        matches!(self, Stage::Meta)
    }

    /// Returns the next numbered stage, if any.
    ///
    /// Meta-mode is entered by trigger, never by advancing, so it has no
    /// successor and is nobody's successor.
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::ContextSeed => Some(Stage::BrainDump),
            Stage::BrainDump => Some(Stage::MindTrace),
            Stage::MindTrace => Some(Stage::SignalScan),
            Stage::SignalScan => Some(Stage::RapidPrototype),
            Stage::RapidPrototype | Stage::Meta => None,
        }
    }

    /// Returns the system directive that guides the AI's response in this stage.
    ///
    /// The directives pin down the exact headings the exit rules parse.
    pub fn directive(&self) -> &'static str {
        match self {
            Stage::ContextSeed => {
                "You are the Ideate-to-Create guide in Stage 0 (Context Seed). Your task is to:\n\
                 1. Extract the creator's identity, goal, constraint, and creative history.\n\
                 2. Perform the 30-second litmus test by restating:\n\
                 Success Today: <one sentence>\n\
                 Primary Constraint: <one sentence>\n\
                 3. If context is unclear, ask for missing details.\n\
                 Use EXACTLY these headings for parsing."
            }
            Stage::BrainDump => {
                "You are the Ideate-to-Create guide in Stage 1 (Brain Dump). Explicitly identify \
                 at least 3 distinct themes from the user's raw ideas. Present them under a \
                 heading **Key Themes:** using a bulleted or numbered list."
            }
            Stage::MindTrace => {
                "You are the Ideate-to-Create guide in Stage 2 (Mind-Trace). Format responses \
                 EXACTLY as follows:\n\n\
                 1. PATTERNS (REQUIRED):\n\
                 Pattern 1: <name>\nEvidence: <quotes/examples>\nConfidence: High/Medium/Low\n\
                 Pattern 2: <name>\nEvidence: <quotes/examples>\nConfidence: High/Medium/Low\n\n\
                 2. CORE MOTIVATION (REQUIRED):\nCore Motivation: <one sentence>\n\n\
                 3. EMOTIONAL SHIFT (REQUIRED):\nEmotional Shift: <the scatter-to-focus transition>\n\n\
                 Use the exact headings above; minimum 2 patterns; never fold patterns or \
                 motivation into paragraphs."
            }
            Stage::SignalScan => {
                "You are the Ideate-to-Create guide in Stage 3 (Signal Scan). Your task is to:\n\
                 1. Identify exactly ONE idea that carries real excitement. Present it under \
                 **Winning Signal:** <one sentence>.\n\
                 2. Mirror the user's emotion in 1-2 sentences under **Emotional Mirror:**.\n\
                 3. Provide a **Micro-Sprint Plan:** with at least 3 bullet steps and, if \
                 helpful, a Success Metric line.\n\
                 If no idea passes the energy test, explicitly respond 'NO SIGNAL - request new \
                 input'. Use the EXACT headings above so the validator can parse them."
            }
            Stage::RapidPrototype => {
                "You are the Ideate-to-Create guide in Stage 4 (Rapid Prototyping). Compose a \
                 planning package that MUST contain these headings exactly:\n\
                 Prototype Goal: <one sentence summary>\n\
                 Won't Build List:\n  - item 1\n\
                 Functional Checkpoint: <how the user can verify basics work>\n\
                 Declare Completion: prompt the user to type \"DONE\" once the prototype runs.\n\
                 Aim for speed over polish - minimum viable first."
            }
            Stage::Meta => {
                "You are the Ideate-to-Create guide in Meta-Mode. Analyze the framework itself:\n\
                 A. **Framework Performance Analysis**: summarize recent interactions and link \
                 observations to Ideate-to-Create principles; for ambiguity resolution suggest \
                 three pathways - (a) synthesize existing knowledge into 3 key principles, \
                 (b) identify 1-2 critical gaps or contradictions, (c) propose a wildcard \
                 insight from an unrelated domain.\n\
                 B. **Internal Logic Reflection**: evaluate scoring, exit criteria, and pain points.\n\
                 C. **Actionable Framework Refinements**: recommend 3 concrete improvements.\n\
                 D. **Micro-Action for Immediate Integration**: suggest one task of 10 minutes \
                 or less to test a refinement."
            }
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number() {
            Some(n) => write!(f, "Stage {} ({})", n, self.label()),
            None => write!(f, "{}", self.label()),
        }
    }
}

impl FromStr for Stage {
    type Err = UnknownStageError;

    /// Parses a raw stage identifier.
    ///
    /// Accepts `"0"`-`"4"`, `"meta"` (case-insensitive), and `"5"` as an
    /// alias for meta-mode, which sits fifth in the stage numbering.
    /// Anything else is an [`UnknownStageError`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" => Ok(Stage::ContextSeed),
            "1" => Ok(Stage::BrainDump),
            "2" => Ok(Stage::MindTrace),
            "3" => Ok(Stage::SignalScan),
            "4" => Ok(Stage::RapidPrototype),
            "5" | "meta" => Ok(Stage::Meta),
            _ => Err(UnknownStageError::new(s.trim())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod stage_basics {
        use super::*;

        #[test]
        fn numbered_stages_report_numbers() {
            assert_eq!(Stage::ContextSeed.number(), Some(0));
            assert_eq!(Stage::RapidPrototype.number(), Some(4));
            assert_eq!(Stage::Meta.number(), None);
        }

        #[test]
        fn all_stages_have_labels_and_directives() {
            for stage in Stage::ALL {
                assert!(!stage.label().is_empty());
                assert!(!stage.directive().is_empty());
            }
        }

        #[test]
        fn only_meta_is_meta() {
            assert!(Stage::Meta.is_meta());
            assert!(!Stage::SignalScan.is_meta());
        }

        #[test]
        fn serializes_to_snake_case() {
            let json = serde_json::to_string(&Stage::MindTrace).unwrap();
            assert_eq!(json, "\"mind_trace\"");
        }

        #[test]
        fn displays_number_and_label() {
            assert_eq!(format!("{}", Stage::SignalScan), "Stage 3 (Signal Scan)");
            assert_eq!(format!("{}", Stage::Meta), "Meta-Mode");
        }
    }

    mod progression {
        use super::*;

        #[test]
        fn numbered_stages_advance_in_order() {
            assert_eq!(Stage::ContextSeed.next(), Some(Stage::BrainDump));
            assert_eq!(Stage::SignalScan.next(), Some(Stage::RapidPrototype));
        }

        #[test]
        fn prototype_and_meta_have_no_successor() {
            assert_eq!(Stage::RapidPrototype.next(), None);
            assert_eq!(Stage::Meta.next(), None);
        }
    }

    mod parsing {
        use super::*;

        #[test]
        fn parses_numbered_identifiers() {
            assert_eq!("0".parse::<Stage>().unwrap(), Stage::ContextSeed);
            assert_eq!("3".parse::<Stage>().unwrap(), Stage::SignalScan);
        }

        #[test]
        fn parses_meta_case_insensitively() {
            assert_eq!("meta".parse::<Stage>().unwrap(), Stage::Meta);
            assert_eq!("META".parse::<Stage>().unwrap(), Stage::Meta);
        }

        #[test]
        fn five_is_an_alias_for_meta() {
            assert_eq!("5".parse::<Stage>().unwrap(), Stage::Meta);
        }

        #[test]
        fn tolerates_surrounding_whitespace() {
            assert_eq!(" 2 ".parse::<Stage>().unwrap(), Stage::MindTrace);
        }

        #[test]
        fn rejects_unknown_identifiers() {
            let err = "7".parse::<Stage>().unwrap_err();
            assert_eq!(err.identifier, "7");
            assert!("stage one".parse::<Stage>().is_err());
            assert!("".parse::<Stage>().is_err());
        }
    }

    mod directives {
        use super::*;

        #[test]
        fn directives_name_the_parsed_headings() {
            assert!(Stage::ContextSeed.directive().contains("Success Today:"));
            assert!(Stage::BrainDump.directive().contains("Key Themes:"));
            assert!(Stage::MindTrace.directive().contains("Core Motivation:"));
            assert!(Stage::SignalScan.directive().contains("Micro-Sprint Plan:"));
            assert!(Stage::RapidPrototype.directive().contains("Won't Build List:"));
            assert!(Stage::Meta.directive().contains("Framework Performance Analysis"));
        }
    }
}
