//! Error Handling Module
//!
//! - Core error type (`LlmError`)
//! - Conversions from the error types of the crates we sit on
//!
//! Transport failures are surfaced to the caller unmodified; the core never
//! retries. `LlmError::is_retryable` is only a hint for callers that do.

mod conversions;
pub mod types;

pub use types::*;
