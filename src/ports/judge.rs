//! AI judge capability interface.

use async_trait::async_trait;
use thiserror::Error;

/// One evaluation request sent to a judge model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeRequest {
    /// Instructions framing the evaluation (rubric prompt block).
    pub system_prompt: String,
    /// The content under evaluation.
    pub user_content: String,
}

impl JudgeRequest {
    pub fn new(system_prompt: impl Into<String>, user_content: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_content: user_content.into(),
        }
    }
}

/// Failures a judge backend can report.
#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("Judge service unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Judge request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("Network error reaching judge: {reason}")]
    Network { reason: String },
}

impl JudgeError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    pub fn network(reason: impl Into<String>) -> Self {
        Self::Network {
            reason: reason.into(),
        }
    }
}

/// Capability interface for scoring text with an AI judge.
///
/// Implementations live in the adapters layer. The domain depends only on
/// this trait, so scoring logic is testable with a scripted mock.
#[async_trait]
pub trait Judge: Send + Sync {
    /// Sends one evaluation request and returns the judge's raw reply.
    async fn evaluate(&self, request: JudgeRequest) -> Result<String, JudgeError>;
}
