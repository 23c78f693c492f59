//! Completion Orchestrator
//!
//! [`ChatClient`] ties the pieces together: it trims the context, encodes
//! messages, resolves parameters, dispatches through the transport and
//! drives either the single-shot path or the stream normalizer.

mod auxiliary;

pub use auxiliary::{DEFAULT_TOPIC_NAMING_PROMPT, TOPIC_NAMING_PROMPT_KEY, ValidationResult};

use crate::encoding::{FileAccess, MessageEncoder};
use crate::error::LlmError;
use crate::params::{ParameterResolver, filter_context};
use crate::provider::{ProviderCapabilities, ProviderConfig};
use crate::streaming::{ChatCompletion, drive_stream};
use crate::traits::{
    CompletionHandler, CompletionResponse, CompletionTransport, SettingsStore, StaticSettings,
};
use crate::transport::HttpTransport;
use crate::types::{
    AssistantSettings, CompletionSummary, Message, ModelInfo, NormalizedEvent, StreamMetrics,
};
use crate::utils::cancel::{CancellationMonitor, PauseRegistry, PauseSignal, StreamKey};
use std::sync::Arc;
use tokio::time::Instant;

/// One chat turn to complete.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Full conversation; trimmed to the assistant's context window
    pub messages: Vec<Message>,
    pub assistant: AssistantSettings,
    pub model: ModelInfo,
    /// Key the pause store is consulted under
    pub stream_key: StreamKey,
}

impl CompletionRequest {
    pub fn new(messages: Vec<Message>, assistant: AssistantSettings, model: ModelInfo) -> Self {
        Self {
            messages,
            assistant,
            model,
            stream_key: StreamKey::generate(),
        }
    }

    pub fn with_stream_key(mut self, key: StreamKey) -> Self {
        self.stream_key = key;
        self
    }
}

/// Chat client for one provider.
#[derive(Clone)]
pub struct ChatClient {
    provider: String,
    capabilities: ProviderCapabilities,
    transport: Arc<dyn CompletionTransport>,
    encoder: MessageEncoder,
    pause: Arc<dyn PauseSignal>,
    settings: Arc<dyn SettingsStore>,
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("provider", &self.provider)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

impl ChatClient {
    /// Client over an arbitrary transport, with an empty pause registry and
    /// no settings.
    pub fn new(
        provider: impl Into<String>,
        capabilities: ProviderCapabilities,
        transport: Arc<dyn CompletionTransport>,
        files: Arc<dyn FileAccess>,
    ) -> Self {
        Self {
            provider: provider.into(),
            capabilities,
            transport,
            encoder: MessageEncoder::new(files),
            pause: Arc::new(PauseRegistry::new()),
            settings: Arc::new(StaticSettings::new()),
        }
    }

    /// Client over [`HttpTransport`] built from `config`.
    pub fn from_config(config: ProviderConfig, files: Arc<dyn FileAccess>) -> Result<Self, LlmError> {
        let provider = config.id.clone();
        let capabilities = config.capabilities;
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(provider, capabilities, Arc::new(transport), files))
    }

    pub fn with_pause_signal(mut self, pause: Arc<dyn PauseSignal>) -> Self {
        self.pause = pause;
        self
    }

    pub fn with_settings(mut self, settings: Arc<dyn SettingsStore>) -> Self {
        self.settings = settings;
        self
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    /// Run one completion, delivering events to `handler` in order.
    ///
    /// A non-streaming response produces exactly one final event. A streamed
    /// response is normalized chunk by chunk and stops early, without error,
    /// once the request's stream key is paused.
    pub async fn complete(
        &self,
        request: CompletionRequest,
        handler: &mut dyn CompletionHandler,
    ) -> Result<CompletionSummary, LlmError> {
        let CompletionRequest {
            messages,
            assistant,
            model,
            stream_key,
        } = request;

        let context = filter_context(&messages, assistant.context_count);
        handler.on_filter_messages(&context);

        let resolver = ParameterResolver::new(&self.capabilities);
        let mut encoded = self
            .encoder
            .encode_all(&context, &model, &self.capabilities)
            .await?;
        resolver.ensure_leading_user_message(&model, &mut encoded);

        let mut wire = Vec::with_capacity(encoded.len() + 1);
        wire.extend(resolver.system_message(&assistant, &model));
        wire.extend(encoded);

        let params = resolver.resolve(&assistant, &model);
        let body = params.to_body(&wire)?;

        tracing::debug!(
            provider = %self.provider,
            model = %model.id,
            stream = params.stream,
            stream_key = %stream_key,
            messages = wire.len(),
            "dispatching completion"
        );

        // Metrics cover the provider call only, not encoding.
        let request_start = Instant::now();
        match self.transport.create_completion(body).await? {
            CompletionResponse::Single(completion) => {
                let event = final_event(completion, request_start, Instant::now());
                let mut summary = CompletionSummary::default();
                summary.absorb(&event);
                handler.on_chunk(event);
                Ok(summary)
            }
            CompletionResponse::Stream(stream) => {
                let monitor = CancellationMonitor::new(self.pause.clone(), stream_key);
                drive_stream(stream, request_start, &monitor, handler).await
            }
        }
    }
}

/// The single event of a non-streaming completion. No token timings are
/// observable, so only the total duration is reported.
fn final_event(completion: ChatCompletion, request_start: Instant, now: Instant) -> NormalizedEvent {
    let elapsed = now.saturating_duration_since(request_start).as_millis();
    NormalizedEvent {
        text: completion.content,
        reasoning_content: completion.reasoning.unwrap_or_default(),
        usage: completion.usage,
        citations: completion.citations,
        metrics: StreamMetrics {
            completion_tokens: completion
                .usage
                .map(|u| u.completion_tokens)
                .unwrap_or(0),
            time_completion_millsec: u64::try_from(elapsed).unwrap_or(u64::MAX),
            ..Default::default()
        },
        is_final: true,
    }
}
