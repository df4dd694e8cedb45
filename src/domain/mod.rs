//! Domain layer containing the validation and scoring logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (stages, scores, timestamps, errors)
//! - `patterns` - Reusable text matchers for headings, labels, lists, and blocks
//! - `rules` - Per-stage exit rules, verdicts, and the validation engine
//! - `scoring` - Rubrics, score sets, judge payload parsing, and the scorer
//! - `triggers` - Meta-mode triggers, overwhelm resizing, constraint detection
//! - `insights` - Interaction records and session-level insight aggregation

pub mod foundation;
pub mod insights;
pub mod patterns;
pub mod rules;
pub mod scoring;
pub mod triggers;
