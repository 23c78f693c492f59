//! HTTP transport for OpenAI-compatible endpoints.
//!
//! Streams are read as Server-Sent Events; every `data:` payload is decoded
//! into a [`ChatChunk`] until the `[DONE]` sentinel.

use crate::error::LlmError;
use crate::provider::ProviderConfig;
use crate::streaming::{ChatChunk, ChatCompletion, ChunkStream};
use crate::traits::{CompletionResponse, CompletionTransport};
use crate::types::ModelDescriptor;
use crate::utils::cancel::AbortHandle;
use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde_json::{Value, json};

const DONE_SENTINEL: &str = "[DONE]";

/// [`CompletionTransport`] over `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl HttpTransport {
    pub fn new(config: ProviderConfig) -> Result<Self, LlmError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key.expose_secret()))
            .map_err(|e| LlmError::ConfigurationError(format!("Invalid API key: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        for (name, value) in &config.custom_headers {
            headers.insert(name.clone(), value.clone());
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<reqwest::Response, LlmError> {
        let url = self.config.endpoint(path);
        tracing::debug!(provider = %self.config.id, %url, "POST");
        let response = self.client.post(&url).json(body).send().await?;
        check_status(response).await
    }

    fn sse_stream(response: reqwest::Response) -> ChunkStream {
        let mut events = response.bytes_stream().eventsource();
        let stream = async_stream::stream! {
            while let Some(event) = events.next().await {
                match event {
                    Ok(event) => {
                        let data = event.data.trim();
                        if data == DONE_SENTINEL {
                            break;
                        }
                        if data.is_empty() {
                            continue;
                        }
                        yield ChatChunk::parse(data);
                    }
                    Err(e) => {
                        yield Err(LlmError::StreamError(format!("SSE error: {e}")));
                        break;
                    }
                }
            }
        };
        Box::pin(stream)
    }
}

#[async_trait]
impl CompletionTransport for HttpTransport {
    async fn create_completion(&self, body: Value) -> Result<CompletionResponse, LlmError> {
        let stream = body.get("stream").and_then(Value::as_bool).unwrap_or(false);
        let response = self.post_json("chat/completions", &body).await?;

        if stream {
            Ok(CompletionResponse::Stream(Self::sse_stream(response)))
        } else {
            let json: Value = response.json().await?;
            Ok(CompletionResponse::Single(ChatCompletion::from_json(&json)?))
        }
    }

    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, LlmError> {
        let url = self.config.endpoint("models");
        tracing::debug!(provider = %self.config.id, %url, "GET");
        let response = check_status(self.client.get(&url).send().await?).await?;
        let json: Value = response.json().await?;

        let data = json
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| LlmError::ParseError("Model listing has no data array".to_string()))?;
        Ok(data.iter().filter_map(parse_model_descriptor).collect())
    }

    async fn create_embedding(&self, model: &str, input: &str) -> Result<Vec<f32>, LlmError> {
        let body = json!({ "model": model, "input": [input] });
        let json: Value = self.post_json("embeddings", &body).await?.json().await?;

        let embedding = json
            .get("data")
            .and_then(|d| d.get(0))
            .and_then(|d| d.get("embedding"))
            .and_then(Value::as_array)
            .ok_or_else(|| LlmError::ParseError("No embedding in response".to_string()))?;
        Ok(embedding
            .iter()
            .filter_map(Value::as_f64)
            .map(|v| v as f32)
            .collect())
    }

    async fn generate_image(&self, body: Value, abort: &AbortHandle) -> Result<Vec<String>, LlmError> {
        let request = async {
            let json: Value = self.post_json("images/generations", &body).await?.json().await?;
            parse_image_urls(&json)
        };
        tokio::select! {
            _ = abort.aborted() => Err(LlmError::Aborted),
            result = request => result,
        }
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let details = serde_json::from_str::<Value>(&text).ok();
    let message = details
        .as_ref()
        .and_then(|d| d.pointer("/error/message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            if text.is_empty() {
                status.to_string()
            } else {
                text.clone()
            }
        });
    tracing::warn!(status = status.as_u16(), %message, "provider returned an error");
    Err(LlmError::ApiError {
        code: status.as_u16(),
        message,
        details,
    })
}

fn parse_model_descriptor(entry: &Value) -> Option<ModelDescriptor> {
    let id = entry.get("id")?.as_str()?.to_string();
    Some(ModelDescriptor {
        id,
        owned_by: entry
            .get("owned_by")
            .and_then(Value::as_str)
            .map(str::to_string),
        created: entry
            .get("created")
            .and_then(Value::as_i64)
            .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0)),
    })
}

fn parse_image_urls(json: &Value) -> Result<Vec<String>, LlmError> {
    let data = json
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| LlmError::ParseError("No images in response".to_string()))?;
    Ok(data
        .iter()
        .filter_map(|image| {
            if let Some(url) = image.get("url").and_then(Value::as_str) {
                Some(url.to_string())
            } else {
                image
                    .get("b64_json")
                    .and_then(Value::as_str)
                    .map(|b64| format!("data:image/png;base64,{b64}"))
            }
        })
        .collect())
}
