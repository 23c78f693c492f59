//! Normalized events handed to the caller.

use serde::{Deserialize, Serialize};

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Latency and token metrics snapshot. All times are milliseconds since the
/// request started; zero means "not observed yet".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamMetrics {
    pub completion_tokens: u32,
    pub time_completion_millsec: u64,
    pub time_first_token_millsec: u64,
    pub time_first_content_millsec: u64,
    pub time_thinking_millsec: u64,
}

/// What a normalized event primarily carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    TextDelta,
    ReasoningDelta,
    UsageSnapshot,
    Citations,
    Terminal,
}

/// One increment of a completion, uniform across providers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    pub text: String,
    pub reasoning_content: String,
    pub usage: Option<Usage>,
    pub citations: Option<Vec<String>>,
    pub metrics: StreamMetrics,
    /// Set on the single event of a non-streaming completion
    pub is_final: bool,
}

impl NormalizedEvent {
    pub fn kind(&self) -> EventKind {
        if self.is_final {
            EventKind::Terminal
        } else if !self.text.is_empty() {
            EventKind::TextDelta
        } else if !self.reasoning_content.is_empty() {
            EventKind::ReasoningDelta
        } else if self.citations.is_some() {
            EventKind::Citations
        } else {
            EventKind::UsageSnapshot
        }
    }
}

/// Aggregate of a finished (or paused) completion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionSummary {
    pub text: String,
    pub reasoning_content: String,
    pub usage: Option<Usage>,
    pub metrics: StreamMetrics,
    pub events: usize,
    /// True when the pause signal stopped consumption early
    pub cancelled: bool,
}

impl CompletionSummary {
    pub(crate) fn absorb(&mut self, event: &NormalizedEvent) {
        self.text.push_str(&event.text);
        self.reasoning_content.push_str(&event.reasoning_content);
        if event.usage.is_some() {
            self.usage = event.usage;
        }
        self.metrics = event.metrics;
        self.events += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_prefers_terminal_then_text() {
        let mut event = NormalizedEvent {
            text: "hi".into(),
            reasoning_content: "hmm".into(),
            ..Default::default()
        };
        assert_eq!(event.kind(), EventKind::TextDelta);
        event.is_final = true;
        assert_eq!(event.kind(), EventKind::Terminal);
    }

    #[test]
    fn kind_falls_back_to_usage() {
        let event = NormalizedEvent {
            usage: Some(Usage::default()),
            ..Default::default()
        };
        assert_eq!(event.kind(), EventKind::UsageSnapshot);
        let event = NormalizedEvent {
            citations: Some(vec!["https://a".into()]),
            ..Default::default()
        };
        assert_eq!(event.kind(), EventKind::Citations);
    }

    #[test]
    fn summary_accumulates_deltas() {
        let mut summary = CompletionSummary::default();
        summary.absorb(&NormalizedEvent {
            text: "Hel".into(),
            ..Default::default()
        });
        summary.absorb(&NormalizedEvent {
            text: "lo".into(),
            usage: Some(Usage {
                completion_tokens: 2,
                ..Default::default()
            }),
            ..Default::default()
        });
        assert_eq!(summary.text, "Hello");
        assert_eq!(summary.events, 2);
        assert_eq!(summary.usage.map(|u| u.completion_tokens), Some(2));
    }
}
