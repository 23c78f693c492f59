use crate::types::{Message, NormalizedEvent};

/// Receives normalized events in order, synchronously with the stream.
///
/// Any `FnMut(NormalizedEvent)` closure is a handler.
pub trait CompletionHandler: Send {
    fn on_chunk(&mut self, event: NormalizedEvent);

    /// Called once with the messages that survived context filtering.
    fn on_filter_messages(&mut self, _messages: &[Message]) {}
}

impl<F> CompletionHandler for F
where
    F: FnMut(NormalizedEvent) + Send,
{
    fn on_chunk(&mut self, event: NormalizedEvent) {
        self(event)
    }
}
