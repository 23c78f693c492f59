//! Shared test doubles: a scripted transport, an in-memory file store and a
//! collecting handler.
#![allow(dead_code)]

pub mod stream_fixture;

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use unichat::encoding::FileAccess;
use unichat::error::LlmError;
use unichat::streaming::{ChatChunk, ChatCompletion};
use unichat::traits::{CompletionHandler, CompletionResponse, CompletionTransport};
use unichat::types::{Message, ModelDescriptor, NormalizedEvent};
use unichat::utils::cancel::AbortHandle;

/// One scripted reply to `create_completion`.
pub enum Reply {
    Single(ChatCompletion),
    /// Chunks, each delivered after its delay
    Stream(Vec<(Duration, ChatChunk)>),
    Fail(LlmError),
}

impl Reply {
    /// Stream whose chunks arrive `gap` apart.
    pub fn stream_every(gap: Duration, chunks: Vec<ChatChunk>) -> Self {
        Reply::Stream(chunks.into_iter().map(|c| (gap, c)).collect())
    }
}

/// Transport that replays scripted replies and records request bodies.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    bodies: Mutex<Vec<Value>>,
    pulled: Arc<AtomicUsize>,
    models: Mutex<Option<Result<Vec<ModelDescriptor>, LlmError>>>,
    embedding: Mutex<Option<Result<Vec<f32>, LlmError>>>,
    image_delay: Mutex<Option<Duration>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, reply: Reply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn with_models(self, models: Result<Vec<ModelDescriptor>, LlmError>) -> Self {
        *self.models.lock().unwrap() = Some(models);
        self
    }

    pub fn with_embedding(self, embedding: Result<Vec<f32>, LlmError>) -> Self {
        *self.embedding.lock().unwrap() = Some(embedding);
        self
    }

    pub fn with_image_delay(self, delay: Duration) -> Self {
        *self.image_delay.lock().unwrap() = Some(delay);
        self
    }

    /// Request bodies seen so far, in order.
    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }

    pub fn last_body(&self) -> Value {
        self.bodies().last().cloned().expect("no request was sent")
    }

    /// How many stream chunks the consumer actually pulled.
    pub fn pulled(&self) -> usize {
        self.pulled.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionTransport for ScriptedTransport {
    async fn create_completion(&self, body: Value) -> Result<CompletionResponse, LlmError> {
        self.bodies.lock().unwrap().push(body);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted reply left");

        match reply {
            Reply::Single(completion) => Ok(CompletionResponse::Single(completion)),
            Reply::Fail(error) => Err(error),
            Reply::Stream(steps) => {
                let pulled = self.pulled.clone();
                let stream = async_stream::stream! {
                    for (delay, chunk) in steps {
                        tokio::time::sleep(delay).await;
                        pulled.fetch_add(1, Ordering::SeqCst);
                        yield Ok(chunk);
                    }
                };
                Ok(CompletionResponse::Stream(Box::pin(stream)))
            }
        }
    }

    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, LlmError> {
        self.models
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn create_embedding(&self, _model: &str, _input: &str) -> Result<Vec<f32>, LlmError> {
        self.embedding
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(LlmError::UnsupportedOperation("no embedding".into())))
    }

    async fn generate_image(&self, body: Value, abort: &AbortHandle) -> Result<Vec<String>, LlmError> {
        self.bodies.lock().unwrap().push(body);
        let delay = self.image_delay.lock().unwrap().unwrap_or_default();
        tokio::select! {
            _ = abort.aborted() => Err(LlmError::Aborted),
            _ = tokio::time::sleep(delay) => Ok(vec!["https://img.example/1.png".to_string()]),
        }
    }
}

/// Files keyed by `id + ext`. Images come back as a fixed data URL.
#[derive(Default)]
pub struct MemoryFiles {
    files: HashMap<String, String>,
}

pub const INLINE_IMAGE: &str = "data:image/png;base64,iVBORw0KGgo=";

impl MemoryFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, content: &str) -> Self {
        self.files.insert(key.to_string(), content.to_string());
        self
    }
}

#[async_trait]
impl FileAccess for MemoryFiles {
    async fn read(&self, file_key: &str) -> Result<String, LlmError> {
        self.files
            .get(file_key)
            .cloned()
            .ok_or_else(|| LlmError::file_error(file_key, "not found"))
    }

    async fn read_as_inline_image(&self, file_key: &str) -> Result<String, LlmError> {
        if self.files.contains_key(file_key) {
            Ok(INLINE_IMAGE.to_string())
        } else {
            Err(LlmError::file_error(file_key, "not found"))
        }
    }
}

/// Wraps [`MemoryFiles`] and sleeps before every read.
pub struct SlowFiles {
    inner: MemoryFiles,
    delay: Duration,
}

impl SlowFiles {
    pub fn new(inner: MemoryFiles, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl FileAccess for SlowFiles {
    async fn read(&self, file_key: &str) -> Result<String, LlmError> {
        tokio::time::sleep(self.delay).await;
        self.inner.read(file_key).await
    }

    async fn read_as_inline_image(&self, file_key: &str) -> Result<String, LlmError> {
        tokio::time::sleep(self.delay).await;
        self.inner.read_as_inline_image(file_key).await
    }
}

/// Records everything the orchestrator hands over.
#[derive(Default)]
pub struct CollectingHandler {
    pub events: Vec<NormalizedEvent>,
    pub filtered: Vec<Vec<Message>>,
}

impl CollectingHandler {
    pub fn text(&self) -> String {
        self.events.iter().map(|e| e.text.as_str()).collect()
    }
}

impl CompletionHandler for CollectingHandler {
    fn on_chunk(&mut self, event: NormalizedEvent) {
        self.events.push(event);
    }

    fn on_filter_messages(&mut self, messages: &[Message]) {
        self.filtered.push(messages.to_vec());
    }
}
