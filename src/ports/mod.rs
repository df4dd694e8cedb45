//! Outbound capability interfaces required by the domain.

mod judge;

pub use judge::{Judge, JudgeError, JudgeRequest};
