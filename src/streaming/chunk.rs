//! Provider response shapes, decoded defensively.
//!
//! OpenAI-compatible vendors share the chat completion shape but disagree on
//! a few fields: the reasoning channel is `reasoning_content` (DeepSeek,
//! SiliconFlow) or `reasoning` (OpenRouter), and some add a top-level
//! `citations` array (Perplexity). Anything with an unexpected type is read
//! as absent.

use crate::error::LlmError;
use crate::types::Usage;
use serde_json::Value;

/// Which wire field carried the reasoning text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasoningField {
    /// `reasoning_content`
    ReasoningContent,
    /// `reasoning`
    Reasoning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasoningDelta {
    pub text: String,
    pub field: ReasoningField,
}

/// One streamed chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatChunk {
    pub content: Option<String>,
    pub reasoning: Option<ReasoningDelta>,
    pub usage: Option<Usage>,
    pub citations: Option<Vec<String>>,
    pub finish_reason: Option<String>,
}

impl ChatChunk {
    /// Parse an SSE `data:` payload.
    pub fn parse(data: &str) -> Result<Self, LlmError> {
        let json: Value = serde_json::from_str(data)
            .map_err(|e| LlmError::ParseError(format!("Failed to parse stream chunk: {e}")))?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &Value) -> Result<Self, LlmError> {
        if !json.is_object() {
            return Err(LlmError::ParseError(format!(
                "Stream chunk is not an object: {json}"
            )));
        }
        let choice = json.get("choices").and_then(|c| c.get(0));
        let delta = choice.and_then(|c| c.get("delta"));

        Ok(Self {
            content: delta.and_then(|d| string_field(d, "content")),
            reasoning: delta.and_then(extract_reasoning),
            usage: json.get("usage").and_then(extract_usage),
            citations: json.get("citations").and_then(extract_citations),
            finish_reason: choice.and_then(|c| string_field(c, "finish_reason")),
        })
    }

    /// A content-only chunk.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// A reasoning-only chunk on the `reasoning_content` field.
    pub fn reasoning(text: impl Into<String>) -> Self {
        Self {
            reasoning: Some(ReasoningDelta {
                text: text.into(),
                field: ReasoningField::ReasoningContent,
            }),
            ..Default::default()
        }
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn with_citations(mut self, citations: Vec<String>) -> Self {
        self.citations = Some(citations);
        self
    }

    /// Content delta, empty when absent.
    pub fn content_delta(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    /// Reasoning delta, empty when absent.
    pub fn reasoning_delta(&self) -> &str {
        self.reasoning
            .as_ref()
            .map(|r| r.text.as_str())
            .unwrap_or_default()
    }

    /// True when the chunk carries content or reasoning text.
    pub fn has_delta(&self) -> bool {
        !self.content_delta().is_empty() || !self.reasoning_delta().is_empty()
    }
}

/// A complete (non-streamed) response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatCompletion {
    pub content: String,
    pub reasoning: Option<String>,
    pub usage: Option<Usage>,
    pub citations: Option<Vec<String>>,
    pub finish_reason: Option<String>,
}

impl ChatCompletion {
    pub fn from_json(json: &Value) -> Result<Self, LlmError> {
        let choice = json
            .get("choices")
            .and_then(|c| c.get(0))
            .ok_or_else(|| LlmError::ParseError("No choices in response".to_string()))?;
        let message = choice.get("message");

        Ok(Self {
            content: message
                .and_then(|m| m.get("content"))
                .map(content_text)
                .unwrap_or_default(),
            reasoning: message
                .and_then(extract_reasoning)
                .map(|r| r.text),
            usage: json.get("usage").and_then(extract_usage),
            citations: json.get("citations").and_then(extract_citations),
            finish_reason: string_field(choice, "finish_reason"),
        })
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(|v| v.as_str()).map(str::to_string)
}

fn extract_reasoning(value: &Value) -> Option<ReasoningDelta> {
    let fields = [
        ("reasoning_content", ReasoningField::ReasoningContent),
        ("reasoning", ReasoningField::Reasoning),
    ];
    fields.into_iter().find_map(|(key, field)| {
        value
            .get(key)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(|text| ReasoningDelta {
                text: text.to_string(),
                field,
            })
    })
}

fn extract_usage(value: &Value) -> Option<Usage> {
    if !value.is_object() {
        return None;
    }
    let count = |key: &str| {
        value
            .get(key)
            .and_then(|v| v.as_u64())
            .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
            .unwrap_or(0)
    };
    Some(Usage {
        prompt_tokens: count("prompt_tokens"),
        completion_tokens: count("completion_tokens"),
        total_tokens: count("total_tokens"),
    })
}

fn extract_citations(value: &Value) -> Option<Vec<String>> {
    let entries = value.as_array()?;
    let citations = entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(url) => Some(url.clone()),
            Value::Object(obj) => obj.get("url").and_then(|u| u.as_str()).map(str::to_string),
            other => {
                tracing::warn!(entry = %other, "ignoring undecodable citation entry");
                None
            }
        })
        .collect();
    Some(citations)
}

/// Message content is a string, or a list of parts of which the text ones count.
fn content_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(parts) => parts
            .iter()
            .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
            .collect(),
        _ => String::new(),
    }
}
