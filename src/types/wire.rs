//! OpenAI-compatible request message shapes.

use super::MessageRole;
use serde::{Deserialize, Serialize};

/// A message as sent on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: MessageRole,
    pub content: WireContent,
}

impl WireMessage {
    pub fn text(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            content: WireContent::Text(text.into()),
        }
    }

    /// Plain text of the message, `None` for multi-part content.
    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            WireContent::Text(text) => Some(text),
            WireContent::Parts(_) => None,
        }
    }
}

/// Either a plain string or an ordered list of content parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        Self::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn multi_part_content_matches_openai_shape() {
        let msg = WireMessage {
            role: MessageRole::User,
            content: WireContent::Parts(vec![
                ContentPart::text("look"),
                ContentPart::image_url("data:image/png;base64,AAAA"),
            ]),
        };
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({
                "role": "user",
                "content": [
                    {"type": "text", "text": "look"},
                    {"type": "image_url", "image_url": {"url": "data:image/png;base64,AAAA"}}
                ]
            })
        );
    }

    #[test]
    fn plain_content_is_a_string() {
        let msg = WireMessage::text(MessageRole::System, "be brief");
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"role": "system", "content": "be brief"})
        );
    }
}
