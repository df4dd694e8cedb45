//! Dialogue triggers detected in *user* prompts.
//!
//! Three concerns live here, all pure text scans over the user's side of
//! the dialogue (AI responses are handled by the exit rules):
//!
//! - meta-mode trigger detection (the user asks to reflect on the framework)
//! - overwhelm detection and the Pause-Name-Resize-Continue strategy
//! - negative-constraint detection for Stage 3 ("no advice", "only confirm")

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static META_TRIGGER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)meta[-\s]?mode|\bzoom\s*out\b|\bhow\s+(?:did|do)\s+you\s+(?:decide|arrive|choose)\b|\bcurious\s+about\s+(?:the\s+)?process\b|why did the framework|how does this stage|explain the system|system reflection",
    )
    .expect("meta trigger regex is valid")
});

/// Constraint phrases that switch Stage 3 into adherence checking.
pub const CONSTRAINT_PHRASES: [&str; 6] = [
    "do not offer",
    "no actionable steps",
    "no advice",
    "no ding-ding-ding",
    "only confirm",
    "nothing more than",
];

static WORD_LIMIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)exactly\s+\d+\s+words").expect("word limit regex is valid"));

/// Returns true if the prompt requests framework-level reflection.
pub fn is_meta_trigger(prompt: &str) -> bool {
    META_TRIGGER_RE.is_match(prompt)
}

/// Returns true if the prompt carries an explicit `[META` reflection tag.
pub fn has_meta_tag(prompt: &str) -> bool {
    prompt.to_ascii_uppercase().contains("[META")
}

/// Negative constraints found in the user prompt, in declaration order.
pub fn negative_constraints(prompt: &str) -> Vec<&'static str> {
    let lowered = prompt.to_ascii_lowercase();
    let mut found: Vec<&'static str> = CONSTRAINT_PHRASES
        .iter()
        .copied()
        .filter(|phrase| lowered.contains(phrase))
        .collect();
    if WORD_LIMIT_RE.is_match(prompt) {
        found.push("exact word limit");
    }
    found
}

/// Emotional states recognized by the overwhelm loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionalState {
    Scattered,
    Heavy,
    Overwhelmed,
    Stuck,
}

impl EmotionalState {
    /// The resizing strategy for this state.
    pub fn resize_strategy(&self) -> &'static str {
        match self {
            EmotionalState::Scattered => "Break into 3 micro-tasks under 15 minutes each",
            EmotionalState::Heavy => "Identify one core element to address now",
            EmotionalState::Overwhelmed => "Find the smallest executable component",
            EmotionalState::Stuck => "Reverse-engineer from the desired outcome",
        }
    }

    /// Short lowercase name matching the user's own wording.
    pub fn label(&self) -> &'static str {
        match self {
            EmotionalState::Scattered => "scattered",
            EmotionalState::Heavy => "heavy",
            EmotionalState::Overwhelmed => "overwhelmed",
            EmotionalState::Stuck => "stuck",
        }
    }
}

/// Detects an overwhelm state from the user's wording, if any.
pub fn detect_overwhelm(prompt: &str) -> Option<EmotionalState> {
    let lowered = prompt.to_ascii_lowercase();
    for state in [
        EmotionalState::Scattered,
        EmotionalState::Heavy,
        EmotionalState::Overwhelmed,
        EmotionalState::Stuck,
    ] {
        if lowered.contains(state.label()) {
            return Some(state);
        }
    }
    if lowered.contains("can't decide") || lowered.contains("too much") {
        return Some(EmotionalState::Overwhelmed);
    }
    None
}

/// The Pause-Name-Resize-Continue intervention for one overwhelm episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizePlan {
    /// The named emotional state.
    pub state: EmotionalState,
    /// The resizing strategy selected for the state.
    pub strategy: String,
    /// System prompt the caller sends to obtain exactly one resized task.
    pub system_prompt: String,
}

/// Builds the resize intervention for a detected state.
pub fn resize_plan(state: EmotionalState) -> ResizePlan {
    let strategy = state.resize_strategy();
    ResizePlan {
        state,
        strategy: strategy.to_string(),
        system_prompt: format!(
            "The user is experiencing feeling {}. Provide exactly one resized task using: {}. \
             Keep it under 2 sentences and clearly actionable.",
            state.label(),
            strategy
        ),
    }
}
