//! Mock judge for testing.
//!
//! A configurable implementation of the Judge port so scoring paths can be
//! exercised without a real model behind them.
//!
//! # Features
//!
//! - Pre-configured replies, consumed in order
//! - Error injection for resilience testing
//! - Simulated latency for timeout testing
//! - Call tracking for verification

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{Judge, JudgeError, JudgeRequest};

/// A configured mock reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return the raw text as the judge's reply.
    Text(String),
    /// Return an error.
    Error(MockJudgeError),
}

/// Mock error shapes for testing error handling.
#[derive(Debug, Clone)]
pub enum MockJudgeError {
    Unavailable { reason: String },
    Timeout { seconds: u64 },
    Network { reason: String },
}

impl From<MockJudgeError> for JudgeError {
    fn from(err: MockJudgeError) -> Self {
        match err {
            MockJudgeError::Unavailable { reason } => JudgeError::unavailable(reason),
            MockJudgeError::Timeout { seconds } => JudgeError::timeout(seconds),
            MockJudgeError::Network { reason } => JudgeError::network(reason),
        }
    }
}

/// Mock judge with scripted replies.
#[derive(Debug, Clone, Default)]
pub struct MockJudge {
    /// Pre-configured replies (consumed in order).
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<JudgeRequest>>>,
}

impl MockJudge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply text.
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Text(text.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: MockJudgeError) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of evaluate calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All recorded requests.
    pub fn get_calls(&self) -> Vec<JudgeRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockReply::Text("{}".to_string()))
    }
}

#[async_trait]
impl Judge for MockJudge {
    async fn evaluate(&self, request: JudgeRequest) -> Result<String, JudgeError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_reply() {
            MockReply::Text(text) => Ok(text),
            MockReply::Error(err) => Err(err.into()),
        }
    }
}
