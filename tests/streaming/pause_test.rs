//! Cooperative cancellation through the pause registry.

use crate::support::{CollectingHandler, MemoryFiles, Reply, ScriptedTransport};
use std::sync::Arc;
use std::time::Duration;
use unichat::streaming::ChatChunk;
use unichat::traits::CompletionHandler;
use unichat::types::{Message, NormalizedEvent};
use unichat::{
    AssistantSettings, ChatClient, CompletionRequest, ModelInfo, PauseRegistry,
    ProviderCapabilities, StreamKey,
};

fn ten_chunks() -> Reply {
    Reply::stream_every(
        Duration::from_millis(10),
        (0..10).map(|i| ChatChunk::text(format!("t{i} "))).collect(),
    )
}

fn setup(transport: Arc<ScriptedTransport>, registry: Arc<PauseRegistry>) -> ChatClient {
    ChatClient::new(
        "openai",
        ProviderCapabilities::lookup("openai"),
        transport,
        Arc::new(MemoryFiles::new()),
    )
    .with_pause_signal(registry)
}

fn request(key: &StreamKey) -> CompletionRequest {
    CompletionRequest::new(
        vec![Message::user("count to ten")],
        AssistantSettings::default(),
        ModelInfo::new("gpt-4o", "openai"),
    )
    .with_stream_key(key.clone())
}

/// Pauses its stream once it has seen `after` events.
struct PausingHandler {
    registry: Arc<PauseRegistry>,
    key: StreamKey,
    after: usize,
    events: Vec<NormalizedEvent>,
}

impl CompletionHandler for PausingHandler {
    fn on_chunk(&mut self, event: NormalizedEvent) {
        self.events.push(event);
        if self.events.len() == self.after {
            self.registry.pause(&self.key);
        }
    }
}

#[tokio::test(start_paused = true)]
async fn pause_before_third_chunk_yields_two_events() {
    let transport = Arc::new(ScriptedTransport::new().reply(ten_chunks()));
    let registry = Arc::new(PauseRegistry::new());
    let client = setup(transport.clone(), registry.clone());
    let key = StreamKey::new("topic-42");
    let mut handler = PausingHandler {
        registry,
        key: key.clone(),
        after: 2,
        events: Vec::new(),
    };

    let summary = client.complete(request(&key), &mut handler).await.unwrap();

    assert_eq!(handler.events.len(), 2);
    assert!(summary.cancelled);
    assert_eq!(summary.text, "t0 t1 ");
    assert_eq!(transport.pulled(), 2);
}

#[tokio::test(start_paused = true)]
async fn pause_from_another_task_stops_between_chunks() {
    let transport = Arc::new(ScriptedTransport::new().reply(ten_chunks()));
    let registry = Arc::new(PauseRegistry::new());
    let client = setup(transport, registry.clone());
    let key = StreamKey::new("topic-7");

    let pauser = {
        let registry = registry.clone();
        let key = key.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(25)).await;
            registry.pause(&key);
        })
    };

    let mut handler = CollectingHandler::default();
    let summary = client.complete(request(&key), &mut handler).await.unwrap();
    pauser.await.unwrap();

    assert!(summary.cancelled);
    assert_eq!(handler.events.len(), 3);
    assert!(handler.events.iter().all(|e| !e.is_final));
}

#[tokio::test(start_paused = true)]
async fn pausing_another_key_does_not_stop_the_stream() {
    let transport = Arc::new(ScriptedTransport::new().reply(ten_chunks()));
    let registry = Arc::new(PauseRegistry::new());
    registry.pause(&StreamKey::new("someone-else"));
    let client = setup(transport, registry);

    let mut handler = CollectingHandler::default();
    let summary = client
        .complete(request(&StreamKey::new("mine")), &mut handler)
        .await
        .unwrap();

    assert!(!summary.cancelled);
    assert_eq!(handler.events.len(), 10);
}
