//! Request parameter resolution.

use super::models::{
    FORMATTING_PREFIX, is_o1_family, requires_leading_user_message, uses_developer_prompt,
};
use crate::error::LlmError;
use crate::provider::ProviderCapabilities;
use crate::types::{AssistantSettings, MessageRole, ModelInfo, ReasoningEffort, WireMessage};
use serde_json::{Map, Value, json};

/// Parameters of one chat completion request, before messages are attached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParameters {
    pub model: String,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub max_tokens: Option<u32>,
    pub max_completion_tokens: Option<u32>,
    pub reasoning_effort: Option<ReasoningEffort>,
    pub include_reasoning: bool,
    pub stream: bool,
    /// Web search and caller fields; merged last and override everything
    pub extra: Map<String, Value>,
}

impl RequestParameters {
    /// Build the JSON request body.
    pub fn to_body(&self, messages: &[WireMessage]) -> Result<Value, LlmError> {
        let mut body = json!({
            "model": self.model,
            "messages": serde_json::to_value(messages)?,
            "stream": self.stream,
        });
        let obj = body
            .as_object_mut()
            .ok_or_else(|| LlmError::InternalError("request body is not an object".into()))?;

        if let Some(temperature) = self.temperature {
            obj.insert("temperature".into(), json!(temperature));
        }
        if let Some(top_p) = self.top_p {
            obj.insert("top_p".into(), json!(top_p));
        }
        if let Some(max_tokens) = self.max_tokens {
            obj.insert("max_tokens".into(), json!(max_tokens));
        }
        if let Some(max_completion_tokens) = self.max_completion_tokens {
            obj.insert("max_completion_tokens".into(), json!(max_completion_tokens));
        }
        if let Some(effort) = self.reasoning_effort {
            obj.insert("reasoning_effort".into(), serde_json::to_value(effort)?);
        }
        if self.include_reasoning {
            obj.insert("include_reasoning".into(), Value::Bool(true));
        }
        for (key, value) in &self.extra {
            obj.insert(key.clone(), value.clone());
        }

        Ok(body)
    }
}

/// Applies the per-provider and per-model-family rules, in precedence order.
#[derive(Debug, Clone, Copy)]
pub struct ParameterResolver<'a> {
    capabilities: &'a ProviderCapabilities,
}

impl<'a> ParameterResolver<'a> {
    pub fn new(capabilities: &'a ProviderCapabilities) -> Self {
        Self { capabilities }
    }

    pub fn resolve(&self, assistant: &AssistantSettings, model: &ModelInfo) -> RequestParameters {
        let mut params = RequestParameters {
            model: model.id.clone(),
            temperature: assistant.temperature,
            top_p: assistant.top_p,
            max_tokens: assistant.max_tokens,
            stream: assistant.stream_output && model.capabilities.streaming,
            ..Default::default()
        };

        if model.capabilities.reasoning {
            params.temperature = None;
            params.top_p = None;
            if self.capabilities.reasoning_controls {
                params.reasoning_effort = assistant.reasoning_effort;
            }
        }

        if self.capabilities.requires_include_reasoning(&model.id) {
            params.include_reasoning = true;
        }

        if is_o1_family(&model.id) {
            params.max_completion_tokens = params.max_tokens.take();
            params.stream = false;
        }

        if assistant.enable_web_search {
            params.extra.extend(self.capabilities.web_search.parameters());
        }
        params.extra.extend(
            assistant
                .custom_parameters
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        params
    }

    /// System message for the request, `None` when there is no prompt.
    /// Developer-prompt models always get a developer message.
    pub fn system_message(
        &self,
        assistant: &AssistantSettings,
        model: &ModelInfo,
    ) -> Option<WireMessage> {
        let prompt = assistant.prompt.as_str();
        let blank = prompt.trim().is_empty();
        if uses_developer_prompt(&model.id) {
            let content = if blank {
                FORMATTING_PREFIX.to_string()
            } else {
                format!("{FORMATTING_PREFIX}\n{prompt}")
            };
            return Some(WireMessage::text(MessageRole::Developer, content));
        }
        (!blank).then(|| WireMessage::text(MessageRole::System, prompt))
    }

    /// Inject an empty user message when the model requires the context to
    /// start with a user turn.
    pub fn ensure_leading_user_message(&self, model: &ModelInfo, context: &mut Vec<WireMessage>) {
        if !requires_leading_user_message(&model.id) {
            return;
        }
        if context.first().map(|m| m.role) != Some(MessageRole::User) {
            context.insert(0, WireMessage::text(MessageRole::User, ""));
        }
    }
}
