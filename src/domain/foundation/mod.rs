//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, enums, and error types that form the
//! vocabulary of the Ideate-to-Create domain.

mod errors;
mod score;
mod stage;
mod timestamp;

pub use errors::{UnknownStageError, ValidationError};
pub use score::Score;
pub use stage::Stage;
pub use timestamp::Timestamp;
