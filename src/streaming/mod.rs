//! Stream Normalizer
//!
//! Decodes provider chunks at the boundary and folds them into
//! [`NormalizedEvent`](crate::types::NormalizedEvent)s with latency metrics.
//!
//! ```text
//! pre-token --first delta--> reasoning --answer content--> content
//!     \_____________________first delta (no reasoning)____/
//! ```

pub mod chunk;
pub mod cursor;
pub mod normalizer;

pub use chunk::{ChatChunk, ChatCompletion, ReasoningDelta, ReasoningField};
pub use cursor::{StreamCursor, THINK_CLOSE_TAG};
pub use normalizer::{StreamNormalizer, drive_stream};

use crate::error::LlmError;
use futures::Stream;
use std::pin::Pin;

/// Boxed stream of decoded chunks, as produced by a transport.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<ChatChunk, LlmError>> + Send>>;
