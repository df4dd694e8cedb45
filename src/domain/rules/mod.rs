//! Stage rule set - one exit rule per workflow stage.
//!
//! Each rule composes pattern-library matchers into a pass/fail predicate
//! with per-requirement detail. Rules are stateless: evaluating the same
//! text twice yields identical verdicts.

mod brain_dump;
mod context_seed;
mod engine;
mod meta_reflection;
mod mind_trace;
mod rapid_prototype;
mod signal_scan;
mod verdict;

pub use brain_dump::BrainDumpRule;
pub use context_seed::ContextSeedRule;
pub use engine::ValidationEngine;
pub use meta_reflection::MetaReflectionRule;
pub use mind_trace::MindTraceRule;
pub use rapid_prototype::RapidPrototypeRule;
pub use signal_scan::SignalScanRule;
pub use verdict::{Requirement, Verdict, VerdictBuilder};

use crate::domain::foundation::Stage;
use crate::domain::patterns::heading_or_label;

/// Uniform evaluation capability implemented by every stage rule.
///
/// Dispatch is by stage identifier through [`ValidationEngine`]; adding a
/// new stage means registering one more implementation, not widening a
/// conditional chain.
pub trait StageRule: Send + Sync {
    /// The stage this rule validates.
    fn stage(&self) -> Stage;

    /// Evaluates an AI response against this stage's exit rule.
    fn evaluate(&self, response: &str) -> Verdict;
}

/// Records a mandatory one-line labeled field (label present with content).
fn require_field(builder: VerdictBuilder, response: &str, name: &str) -> VerdictBuilder {
    let (satisfied, detail) = field_status(response, name);
    builder
        .trace(name, detail.clone())
        .mandatory(name, satisfied, detail)
}

/// Records an optional labeled field that never gates the verdict.
fn optional_field(builder: VerdictBuilder, response: &str, name: &str) -> VerdictBuilder {
    let (satisfied, detail) = field_status(response, name);
    builder
        .trace(name, detail.clone())
        .optional(name, satisfied, detail)
}

fn field_status(response: &str, name: &str) -> (bool, String) {
    match heading_or_label(response, name) {
        Some(m) if m.has_content() => (
            true,
            format!("'{}:' found on line {}", name, m.line_index + 1),
        ),
        Some(m) => (
            false,
            format!("'{}:' found on line {} but empty", name, m.line_index + 1),
        ),
        None => (false, format!("'{}:' label not found", name)),
    }
}
