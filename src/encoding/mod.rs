//! Message Encoder
//!
//! Turns application messages into OpenAI-compatible wire messages, inlining
//! attachments according to model and provider capabilities.

pub mod files;
pub mod message;

pub use files::{FileAccess, LocalFileAccess};
pub use message::{FILE_SEPARATOR, MessageEncoder};
