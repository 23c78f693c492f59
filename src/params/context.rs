//! Context window trimming.

use crate::types::Message;

/// Extra messages kept on top of the assistant's context count.
pub const CONTEXT_MARGIN: usize = 2;

/// Drop empty messages and keep the most recent `context_count + CONTEXT_MARGIN`.
pub fn filter_context(messages: &[Message], context_count: usize) -> Vec<Message> {
    let kept: Vec<&Message> = messages.iter().filter(|m| !m.is_empty()).collect();
    let take = context_count.saturating_add(CONTEXT_MARGIN);
    let start = kept.len().saturating_sub(take);
    kept[start..].iter().map(|m| (*m).clone()).collect()
}
