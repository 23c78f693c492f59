//! Model-id families with special request handling.

/// DeepSeek's reasoner rejects conversations that do not start with a user turn.
pub const REASONER_MODEL_ID: &str = "deepseek-reasoner";

/// Prefix prepended to the system prompt of models that read it as a
/// developer message.
pub const FORMATTING_PREFIX: &str = "Formatting re-enabled";

/// `o1*` models: `max_completion_tokens` instead of `max_tokens`, no streaming.
pub fn is_o1_family(model_id: &str) -> bool {
    model_id.starts_with("o1")
}

/// Models that take the system prompt as a `developer` message.
pub fn uses_developer_prompt(model_id: &str) -> bool {
    matches!(model_id, "o1" | "o1-2024-12-17") || model_id.starts_with("o3")
}

pub fn requires_leading_user_message(model_id: &str) -> bool {
    model_id == REASONER_MODEL_ID
}
