//! Judge backends.

mod mock;

pub use mock::{MockJudge, MockJudgeError, MockReply};
