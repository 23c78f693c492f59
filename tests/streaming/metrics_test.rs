//! Latency metrics observed end to end with a paused clock.

use crate::support::{CollectingHandler, MemoryFiles, Reply, ScriptedTransport, SlowFiles};
use std::sync::Arc;
use std::time::Duration;
use unichat::streaming::{ChatChunk, THINK_CLOSE_TAG};
use unichat::types::{EventKind, FileAttachment, FileType, Usage};
use unichat::{AssistantSettings, ChatClient, CompletionRequest, Message, ModelInfo, ProviderCapabilities};

fn client(transport: Arc<ScriptedTransport>) -> ChatClient {
    ChatClient::new(
        "deepseek",
        ProviderCapabilities::lookup("deepseek"),
        transport,
        Arc::new(MemoryFiles::new()),
    )
}

fn request(model: ModelInfo) -> CompletionRequest {
    CompletionRequest::new(
        vec![Message::user("Why is the sky blue?")],
        AssistantSettings::default(),
        model,
    )
}

#[tokio::test(start_paused = true)]
async fn reasoning_then_answer_sets_thinking_time_once() {
    let transport = Arc::new(ScriptedTransport::new().reply(Reply::Stream(vec![
        (Duration::from_millis(100), ChatChunk::reasoning("Rayleigh")),
        (Duration::from_millis(100), ChatChunk::reasoning(" scattering")),
        (Duration::from_millis(50), ChatChunk::text("Because")),
        (Duration::from_millis(30), ChatChunk::text(" of scattering.")),
    ])));
    let client = client(transport);
    let mut handler = CollectingHandler::default();

    let model = ModelInfo::new("deepseek-reasoner", "deepseek").with_reasoning(true);
    let summary = client.complete(request(model), &mut handler).await.unwrap();

    let metrics: Vec<_> = handler.events.iter().map(|e| e.metrics).collect();
    assert_eq!(metrics.len(), 4);

    assert!(metrics.iter().all(|m| m.time_first_token_millsec == 100));
    assert_eq!(metrics[0].time_thinking_millsec, 0);
    assert_eq!(metrics[1].time_thinking_millsec, 0);
    assert_eq!(metrics[2].time_thinking_millsec, 250);
    assert_eq!(metrics[3].time_thinking_millsec, 250);
    assert_eq!(metrics[3].time_first_content_millsec, 250);
    assert_eq!(metrics[3].time_completion_millsec, 280);

    assert_eq!(handler.events[0].kind(), EventKind::ReasoningDelta);
    assert_eq!(handler.events[2].kind(), EventKind::TextDelta);
    assert_eq!(summary.reasoning_content, "Rayleigh scattering");
    assert_eq!(summary.text, "Because of scattering.");
}

#[tokio::test(start_paused = true)]
async fn completion_time_never_decreases() {
    let transport = Arc::new(ScriptedTransport::new().reply(Reply::stream_every(
        Duration::from_millis(20),
        ["a", "b", "c", "d", "e"].into_iter().map(ChatChunk::text).collect(),
    )));
    let client = client(transport);
    let mut handler = CollectingHandler::default();

    client
        .complete(request(ModelInfo::new("deepseek-chat", "deepseek")), &mut handler)
        .await
        .unwrap();

    let times: Vec<u64> = handler
        .events
        .iter()
        .map(|e| e.metrics.time_completion_millsec)
        .collect();
    assert_eq!(times, vec![20, 40, 60, 80, 100]);
    assert!(
        handler
            .events
            .iter()
            .all(|e| e.metrics.time_first_token_millsec == 20)
    );
}

#[tokio::test(start_paused = true)]
async fn inline_close_tag_marks_first_content() {
    let transport = Arc::new(ScriptedTransport::new().reply(Reply::stream_every(
        Duration::from_millis(10),
        vec![
            ChatChunk::text("<think>"),
            ChatChunk::text("planning"),
            ChatChunk::text(THINK_CLOSE_TAG),
            ChatChunk::text("Done"),
        ],
    )));
    let client = client(transport);
    let mut handler = CollectingHandler::default();

    client
        .complete(request(ModelInfo::new("qwq-32b", "deepseek")), &mut handler)
        .await
        .unwrap();

    let firsts: Vec<u64> = handler
        .events
        .iter()
        .map(|e| e.metrics.time_first_content_millsec)
        .collect();
    assert_eq!(firsts, vec![0, 0, 30, 30]);
}

#[tokio::test(start_paused = true)]
async fn usage_tail_chunk_is_reported_and_carried() {
    let usage = Usage {
        prompt_tokens: 12,
        completion_tokens: 2,
        total_tokens: 14,
    };
    let transport = Arc::new(ScriptedTransport::new().reply(Reply::stream_every(
        Duration::from_millis(5),
        vec![
            ChatChunk::text("Hi"),
            ChatChunk::default(),
            ChatChunk::default().with_usage(usage),
        ],
    )));
    let client = client(transport);
    let mut handler = CollectingHandler::default();

    let summary = client
        .complete(request(ModelInfo::new("deepseek-chat", "deepseek")), &mut handler)
        .await
        .unwrap();

    assert_eq!(handler.events.len(), 2);
    let last = handler.events.last().unwrap();
    assert_eq!(last.kind(), EventKind::UsageSnapshot);
    assert_eq!(last.metrics.completion_tokens, 2);
    assert_eq!(summary.usage, Some(usage));
}

#[tokio::test(start_paused = true)]
async fn attachment_reads_are_not_counted_as_latency() {
    let transport = Arc::new(ScriptedTransport::new().reply(Reply::stream_every(
        Duration::from_millis(10),
        vec![ChatChunk::text("Sum"), ChatChunk::text("mary")],
    )));
    let files = SlowFiles::new(
        MemoryFiles::new().with("doc1.txt", "quarterly numbers"),
        Duration::from_millis(500),
    );
    let client = ChatClient::new(
        "deepseek",
        ProviderCapabilities::lookup("deepseek"),
        transport,
        Arc::new(files),
    );
    let mut handler = CollectingHandler::default();

    let message = Message::user("Summarize the report")
        .with_file(FileAttachment::new("doc1", ".txt", FileType::Text, "report.txt"));
    let request = CompletionRequest::new(
        vec![message],
        AssistantSettings::default(),
        ModelInfo::new("deepseek-chat", "deepseek"),
    );
    let summary = client.complete(request, &mut handler).await.unwrap();

    assert_eq!(handler.events[0].metrics.time_first_token_millsec, 10);
    assert_eq!(summary.metrics.time_first_token_millsec, 10);
    assert_eq!(summary.metrics.time_completion_millsec, 20);
}
