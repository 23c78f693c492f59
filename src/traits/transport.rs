use crate::error::LlmError;
use crate::streaming::{ChatCompletion, ChunkStream};
use crate::types::ModelDescriptor;
use crate::utils::cancel::AbortHandle;
use async_trait::async_trait;
use serde_json::Value;

/// What a completion request produced.
pub enum CompletionResponse {
    Single(ChatCompletion),
    Stream(ChunkStream),
}

impl std::fmt::Debug for CompletionResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(completion) => f.debug_tuple("Single").field(completion).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// OpenAI-compatible HTTP surface.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    /// POST `/chat/completions`. The body's `stream` flag decides the variant.
    async fn create_completion(&self, body: Value) -> Result<CompletionResponse, LlmError>;

    /// GET `/models`.
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, LlmError>;

    /// POST `/embeddings` for a single input.
    async fn create_embedding(&self, _model: &str, _input: &str) -> Result<Vec<f32>, LlmError> {
        Err(LlmError::UnsupportedOperation(
            "Embeddings not supported by this transport".to_string(),
        ))
    }

    /// POST `/images/generations`, returning image URLs or data URLs.
    async fn generate_image(
        &self,
        _body: Value,
        _abort: &AbortHandle,
    ) -> Result<Vec<String>, LlmError> {
        Err(LlmError::UnsupportedOperation(
            "Image generation not supported by this transport".to_string(),
        ))
    }
}
