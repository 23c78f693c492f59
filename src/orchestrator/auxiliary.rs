//! One-shot helpers built on the same transport: translation, topic naming,
//! connectivity checks, model listing, embeddings and images.

use super::ChatClient;
use crate::error::LlmError;
use crate::params::ParameterResolver;
use crate::traits::CompletionResponse;
use crate::types::{
    AssistantSettings, ImageRequest, Message, MessageRole, ModelDescriptor, ModelInfo, WireMessage,
};
use crate::utils::cancel::AbortHandle;
use futures::StreamExt;
use serde_json::Value;

/// Settings key holding the topic naming prompt.
pub const TOPIC_NAMING_PROMPT_KEY: &str = "topic_naming_prompt";

pub const DEFAULT_TOPIC_NAMING_PROMPT: &str = "Summarize the conversation into a title of at most 10 words \
in the language of the conversation. Reply with the title only, without punctuation or quotes.";

const TITLE_CONTEXT: usize = 5;
const PROBE_TEXT: &str = "hi";

/// Outcome of [`ChatClient::check`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub valid: bool,
    pub error: Option<LlmError>,
}

impl ChatClient {
    /// Translate `content` using the assistant's prompt as instructions.
    ///
    /// `on_partial` receives the accumulated translation after every streamed
    /// delta and once more with `is_complete == true`.
    pub async fn translate<F>(
        &self,
        content: &str,
        assistant: &AssistantSettings,
        model: &ModelInfo,
        mut on_partial: F,
    ) -> Result<String, LlmError>
    where
        F: FnMut(&str, bool) + Send,
    {
        let resolver = ParameterResolver::new(&self.capabilities);
        let mut messages: Vec<WireMessage> =
            resolver.system_message(assistant, model).into_iter().collect();
        messages.push(WireMessage::text(MessageRole::User, content));
        let body = resolver.resolve(assistant, model).to_body(&messages)?;

        self.collect_text(body, model, &mut on_partial).await
    }

    /// Name a conversation from its last few messages. Preset messages
    /// among them are left out.
    pub async fn summarize_title(
        &self,
        messages: &[Message],
        model: &ModelInfo,
    ) -> Result<String, LlmError> {
        let prompt = self
            .settings
            .get(TOPIC_NAMING_PROMPT_KEY)
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TOPIC_NAMING_PROMPT.to_string());

        let start = messages.len().saturating_sub(TITLE_CONTEXT);
        let transcript = messages[start..]
            .iter()
            .filter(|m| !m.is_preset)
            .map(|m| format!("{}: {}", m.role, m.content))
            .collect::<Vec<_>>()
            .join("\n");

        let raw = self.generate_text(&prompt, &transcript, model).await?;
        Ok(clean_title(&raw))
    }

    /// Single non-streamed system + user exchange.
    pub async fn generate_text(
        &self,
        prompt: &str,
        content: &str,
        model: &ModelInfo,
    ) -> Result<String, LlmError> {
        let assistant = AssistantSettings::default()
            .with_prompt(prompt)
            .with_stream_output(false);
        let resolver = ParameterResolver::new(&self.capabilities);
        let mut messages: Vec<WireMessage> =
            resolver.system_message(&assistant, model).into_iter().collect();
        messages.push(WireMessage::text(MessageRole::User, content));
        let body = resolver.resolve(&assistant, model).to_body(&messages)?;

        self.collect_text(body, model, &mut |_: &str, _: bool| {}).await
    }

    /// Probe the provider with a tiny request. Never fails.
    pub async fn check(&self, model: &ModelInfo) -> ValidationResult {
        let body = serde_json::json!({
            "model": model.id,
            "messages": [{"role": "user", "content": PROBE_TEXT}],
            "stream": false,
        });

        let outcome = match self.transport.create_completion(body).await {
            Ok(CompletionResponse::Single(_)) => Ok(()),
            Ok(CompletionResponse::Stream(mut stream)) => match stream.next().await {
                Some(Err(e)) => Err(e),
                _ => Ok(()),
            },
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => ValidationResult {
                valid: true,
                error: None,
            },
            Err(error) => {
                tracing::warn!(provider = %self.provider, model = %model.id, %error, "validation probe failed");
                ValidationResult {
                    valid: false,
                    error: Some(error),
                }
            }
        }
    }

    /// Models offered by the provider, empty when listing fails.
    pub async fn models(&self) -> Vec<ModelDescriptor> {
        match self.transport.list_models().await {
            Ok(models) => models,
            Err(error) => {
                tracing::warn!(provider = %self.provider, %error, "model listing failed");
                Vec::new()
            }
        }
    }

    /// Length of the embedding vectors produced by `model`.
    pub async fn embedding_dimensions(&self, model: &ModelInfo) -> Result<usize, LlmError> {
        let embedding = self
            .transport
            .create_embedding(&model.id, PROBE_TEXT)
            .await?;
        Ok(embedding.len())
    }

    /// Generate images; `abort` cancels the in-flight request.
    pub async fn generate_image(
        &self,
        request: ImageRequest,
        abort: &AbortHandle,
    ) -> Result<Vec<String>, LlmError> {
        if abort.is_aborted() {
            return Err(LlmError::Aborted);
        }
        tracing::debug!(provider = %self.provider, model = %request.model, n = request.n, "generating image");
        let body = serde_json::to_value(&request)?;
        self.transport.generate_image(body, abort).await
    }

    async fn collect_text(
        &self,
        body: Value,
        model: &ModelInfo,
        on_partial: &mut (dyn FnMut(&str, bool) + Send),
    ) -> Result<String, LlmError> {
        tracing::debug!(provider = %self.provider, model = %model.id, "dispatching one-shot completion");
        match self.transport.create_completion(body).await? {
            CompletionResponse::Single(completion) => {
                on_partial(&completion.content, true);
                Ok(completion.content)
            }
            CompletionResponse::Stream(mut stream) => {
                let mut text = String::new();
                while let Some(chunk) = stream.next().await {
                    let chunk = chunk?;
                    let delta = chunk.content_delta();
                    if delta.is_empty() {
                        continue;
                    }
                    text.push_str(delta);
                    on_partial(&text, false);
                }
                on_partial(&text, true);
                Ok(text)
            }
        }
    }
}

/// Strip inline reasoning and decoration from a model-produced title.
fn clean_title(raw: &str) -> String {
    let mut text = raw.to_string();
    while let Some(open) = text.find("<think>") {
        match text[open..].find("</think>") {
            Some(close) => text.replace_range(open..open + close + "</think>".len(), ""),
            None => text.truncate(open),
        }
    }
    text.trim()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '“' | '”' | '「' | '」') || c.is_whitespace())
        .to_string()
}
