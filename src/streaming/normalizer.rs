//! Chunk to event folding and the consumption loop.

use super::ChunkStream;
use super::chunk::ChatChunk;
use super::cursor::StreamCursor;
use crate::error::LlmError;
use crate::traits::CompletionHandler;
use crate::types::{CompletionSummary, NormalizedEvent};
use crate::utils::cancel::CancellationMonitor;
use futures::StreamExt;
use tokio::time::Instant;

/// Turns raw chunks into [`NormalizedEvent`]s.
#[derive(Debug, Clone)]
pub struct StreamNormalizer {
    cursor: StreamCursor,
}

impl StreamNormalizer {
    pub fn new(request_start: Instant) -> Self {
        Self {
            cursor: StreamCursor::new(request_start),
        }
    }

    pub fn cursor(&self) -> &StreamCursor {
        &self.cursor
    }

    /// Returns `None` for chunks with nothing to report (role-only deltas,
    /// bare finish markers).
    pub fn normalize(&mut self, chunk: ChatChunk, now: Instant) -> Option<NormalizedEvent> {
        if !chunk.has_delta() && chunk.usage.is_none() && chunk.citations.is_none() {
            return None;
        }
        let metrics = self.cursor.advance(&chunk, now);
        Some(NormalizedEvent {
            text: chunk.content.unwrap_or_default(),
            reasoning_content: chunk.reasoning.map(|r| r.text).unwrap_or_default(),
            usage: chunk.usage,
            citations: chunk.citations,
            metrics,
            is_final: false,
        })
    }
}

/// Consume `stream` to completion, handing each event to `handler` before the
/// next chunk is requested.
///
/// The monitor is consulted before every pull. When it reports a stop the
/// stream is dropped, which closes the underlying connection, and the summary
/// comes back with `cancelled` set. Mid-stream transport errors propagate.
pub async fn drive_stream(
    mut stream: ChunkStream,
    request_start: Instant,
    monitor: &CancellationMonitor,
    handler: &mut dyn CompletionHandler,
) -> Result<CompletionSummary, LlmError> {
    let mut normalizer = StreamNormalizer::new(request_start);
    let mut summary = CompletionSummary::default();

    loop {
        if monitor.should_stop() {
            summary.cancelled = true;
            break;
        }
        let Some(item) = stream.next().await else {
            break;
        };
        let chunk = item?;
        if let Some(event) = normalizer.normalize(chunk, Instant::now()) {
            summary.absorb(&event);
            handler.on_chunk(event);
        }
    }

    tracing::debug!(
        stream_key = %monitor.key(),
        events = summary.events,
        cancelled = summary.cancelled,
        "stream finished"
    );
    Ok(summary)
}
