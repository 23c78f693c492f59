//! Latency bookkeeping for one stream.

use super::chunk::ChatChunk;
use crate::types::StreamMetrics;
use tokio::time::Instant;

/// Some models emit their reasoning inline and close it with this tag as a
/// chunk of its own.
pub const THINK_CLOSE_TAG: &str = "</think>";

/// Per-stream state: the request start, the latched first-token and
/// first-content instants, and the last reported completion token count.
#[derive(Debug, Clone)]
pub struct StreamCursor {
    request_start: Instant,
    has_reasoning_started: bool,
    first_token_at: Option<Instant>,
    first_content_at: Option<Instant>,
    completion_tokens: u32,
}

impl StreamCursor {
    pub fn new(request_start: Instant) -> Self {
        Self {
            request_start,
            has_reasoning_started: false,
            first_token_at: None,
            first_content_at: None,
            completion_tokens: 0,
        }
    }

    pub fn has_reasoning_started(&self) -> bool {
        self.has_reasoning_started
    }

    pub fn first_token_at(&self) -> Option<Instant> {
        self.first_token_at
    }

    pub fn first_content_at(&self) -> Option<Instant> {
        self.first_content_at
    }

    /// Fold `chunk`, observed at `now`, into the cursor and return the metrics
    /// snapshot for it. Both instants latch: once set they never move.
    pub fn advance(&mut self, chunk: &ChatChunk, now: Instant) -> StreamMetrics {
        if !chunk.reasoning_delta().is_empty() {
            self.has_reasoning_started = true;
        }
        if self.first_token_at.is_none() && chunk.has_delta() {
            self.first_token_at = Some(now);
        }
        if self.first_content_at.is_none() && self.reasoning_ended_at(chunk) {
            self.first_content_at = Some(now);
        }
        if let Some(usage) = chunk.usage {
            self.completion_tokens = usage.completion_tokens;
        }
        self.metrics(now)
    }

    /// The snapshot as of `now` without folding a chunk.
    pub fn metrics(&self, now: Instant) -> StreamMetrics {
        let since_start = |at: Option<Instant>| at.map(|at| self.millis(at)).unwrap_or(0);
        let first_content = since_start(self.first_content_at);
        StreamMetrics {
            completion_tokens: self.completion_tokens,
            time_completion_millsec: self.millis(now),
            time_first_token_millsec: since_start(self.first_token_at),
            time_first_content_millsec: first_content,
            time_thinking_millsec: first_content,
        }
    }

    /// Answer content after reasoning, or an explicit close tag.
    fn reasoning_ended_at(&self, chunk: &ChatChunk) -> bool {
        let content = chunk.content_delta();
        (self.has_reasoning_started && !content.is_empty()) || content == THINK_CLOSE_TAG
    }

    fn millis(&self, at: Instant) -> u64 {
        let elapsed = at.saturating_duration_since(self.request_start);
        u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}
