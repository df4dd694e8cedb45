//! Ideate Engine - Stage Exit-Rule Validation and Self-Evaluation Scoring
//!
//! This crate implements the validation core of the Ideate-to-Create dialogue
//! framework: per-stage exit-rule grammars over free-form AI responses, plus
//! rubric-based self-evaluation scoring through an injected judge capability.
//!
//! Callers own transport, persistence, and presentation; this crate turns an
//! AI response string into a structured [`domain::rules::Verdict`] or a
//! [`domain::scoring::ScoreSet`].

pub mod adapters;
pub mod domain;
pub mod ports;
