//! Per-request assistant configuration.

use serde::{Deserialize, Serialize};

/// Reasoning effort hint forwarded to reasoning-capable models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Low,
    Medium,
    High,
}

/// Settings of the assistant issuing a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantSettings {
    /// System prompt, empty for none
    #[serde(default)]
    pub prompt: String,
    /// Number of history messages to keep (a margin is added on top)
    pub context_count: usize,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub reasoning_effort: Option<ReasoningEffort>,
    pub stream_output: bool,
    #[serde(default)]
    pub enable_web_search: bool,
    /// Caller supplied request fields, merged last
    #[serde(default)]
    pub custom_parameters: serde_json::Map<String, serde_json::Value>,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            context_count: 5,
            max_tokens: None,
            temperature: Some(0.7),
            top_p: Some(1.0),
            reasoning_effort: None,
            stream_output: true,
            enable_web_search: false,
            custom_parameters: serde_json::Map::new(),
        }
    }
}

impl AssistantSettings {
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_context_count(mut self, count: usize) -> Self {
        self.context_count = count;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_reasoning_effort(mut self, effort: ReasoningEffort) -> Self {
        self.reasoning_effort = Some(effort);
        self
    }

    pub fn with_stream_output(mut self, stream: bool) -> Self {
        self.stream_output = stream;
        self
    }

    pub fn with_web_search(mut self, enabled: bool) -> Self {
        self.enable_web_search = enabled;
        self
    }

    pub fn with_custom_parameter(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.custom_parameters.insert(key.into(), value.into());
        self
    }
}
