//! unichat
//!
//! Normalizes OpenAI-compatible chat completion backends into one streaming
//! event protocol: encoded messages and resolved parameters go out, ordered
//! [`NormalizedEvent`]s with latency metrics come back.
#![deny(unsafe_code)]

pub mod encoding;
pub mod error;
pub mod orchestrator;
pub mod params;
pub mod provider;
pub mod streaming;
pub mod traits;
pub mod transport;
pub mod types;
pub mod utils;

pub use error::LlmError;
pub use orchestrator::{ChatClient, CompletionRequest, ValidationResult};
pub use provider::{ProviderCapabilities, ProviderConfig};
pub use traits::{CompletionHandler, CompletionTransport};
pub use types::{
    AssistantSettings, CompletionSummary, Message, ModelInfo, NormalizedEvent, StreamMetrics,
};
pub use utils::cancel::{AbortHandle, PauseRegistry, StreamKey};

/// Commonly used items.
pub mod prelude {
    pub use crate::encoding::{FileAccess, LocalFileAccess};
    pub use crate::error::LlmError;
    pub use crate::orchestrator::{ChatClient, CompletionRequest, ValidationResult};
    pub use crate::provider::{ProviderCapabilities, ProviderConfig, WebSearchStyle};
    pub use crate::traits::*;
    pub use crate::transport::HttpTransport;
    pub use crate::types::*;
    pub use crate::utils::cancel::*;
}
