//! SSE body builders for HTTP-level tests

/// Frame each payload as an SSE `data:` event and terminate with `[DONE]`.
pub fn sse_body(payloads: &[&str]) -> String {
    let mut body = String::new();
    for payload in payloads {
        body.push_str("data: ");
        body.push_str(payload);
        body.push_str("\n\n");
    }
    body.push_str("data: [DONE]\n\n");
    body
}

/// A `chat.completion.chunk` payload carrying only a content delta.
pub fn content_chunk(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion.chunk",
        "choices": [{"index": 0, "delta": {"content": content}, "finish_reason": null}]
    })
    .to_string()
}

/// A chunk carrying only a reasoning delta on the `reasoning_content` field.
pub fn reasoning_chunk(reasoning: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion.chunk",
        "choices": [{"index": 0, "delta": {"reasoning_content": reasoning}, "finish_reason": null}]
    })
    .to_string()
}
