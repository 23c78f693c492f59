//! Application message -> wire message.

use super::files::FileAccess;
use crate::error::LlmError;
use crate::provider::ProviderCapabilities;
use crate::types::{ContentPart, FileType, Message, ModelInfo, WireContent, WireMessage};
use std::sync::Arc;

/// Separator placed after the text and after every inlined file when the
/// provider cannot take files as content parts.
pub const FILE_SEPARATOR: &str = "\n\n---\n\n";

/// Encodes messages, reading attachments through a [`FileAccess`].
#[derive(Clone)]
pub struct MessageEncoder {
    files: Arc<dyn FileAccess>,
}

impl MessageEncoder {
    pub fn new(files: Arc<dyn FileAccess>) -> Self {
        Self { files }
    }

    /// Encode one message. Attachments the model or provider cannot take are
    /// skipped; read failures propagate.
    pub async fn encode(
        &self,
        message: &Message,
        model: &ModelInfo,
        capabilities: &ProviderCapabilities,
    ) -> Result<WireMessage, LlmError> {
        if message.files.is_empty() {
            return Ok(WireMessage::text(message.role, message.content.clone()));
        }

        if !capabilities.supports_files {
            return self.encode_inlined_text(message).await;
        }

        let mut parts = Vec::with_capacity(message.files.len() + 1);
        parts.push(ContentPart::text(message.content.clone()));

        for file in &message.files {
            match file.file_type {
                FileType::Image if model.capabilities.vision => {
                    let url = self.files.read_as_inline_image(&file.key()).await?;
                    parts.push(ContentPart::image_url(url));
                }
                FileType::Text | FileType::Document => {
                    let content = self.files.read(&file.key()).await?;
                    parts.push(ContentPart::text(format!(
                        "{}\n{}",
                        file.origin_name, content
                    )));
                }
                _ => {
                    tracing::debug!(
                        file = %file.origin_name,
                        file_type = ?file.file_type,
                        model = %model.id,
                        "skipping attachment the model cannot take"
                    );
                }
            }
        }

        Ok(WireMessage {
            role: message.role,
            content: WireContent::Parts(parts),
        })
    }

    /// Encode a batch, preserving order.
    pub async fn encode_all(
        &self,
        messages: &[Message],
        model: &ModelInfo,
        capabilities: &ProviderCapabilities,
    ) -> Result<Vec<WireMessage>, LlmError> {
        let mut out = Vec::with_capacity(messages.len());
        for message in messages {
            out.push(self.encode(message, model, capabilities).await?);
        }
        Ok(out)
    }

    async fn encode_inlined_text(&self, message: &Message) -> Result<WireMessage, LlmError> {
        let mut text = message.content.clone();
        let mut inlined = Vec::new();

        for file in message.files.iter().filter(|f| f.file_type.is_textual()) {
            let content = self.files.read(&file.key()).await?;
            inlined.push(format!("file: {}\n\n{}", file.origin_name, content.trim()));
        }

        if !inlined.is_empty() {
            text.push_str(FILE_SEPARATOR);
            for entry in inlined {
                text.push_str(&entry);
                text.push_str(FILE_SEPARATOR);
            }
        }

        Ok(WireMessage::text(message.role, text))
    }
}
