//! Foundation module - Shared domain primitives.
//!
//! Contains the value objects and error types that form the vocabulary
//! of the Finanwas domain.

mod errors;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use timestamp::Timestamp;
