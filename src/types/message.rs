//! Application-level chat messages.

use serde::{Deserialize, Serialize};

/// Role of a message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Developer,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Developer => "developer",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of an attached file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Image,
    Text,
    Document,
    Audio,
    Video,
    Other,
}

impl FileType {
    /// Files whose content is inlined as text.
    pub fn is_textual(&self) -> bool {
        matches!(self, Self::Text | Self::Document)
    }
}

/// Reference to a file attached to a message. Content is fetched on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub id: String,
    /// Extension including the leading dot, e.g. `.png`
    pub ext: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    pub origin_name: String,
}

impl FileAttachment {
    pub fn new(
        id: impl Into<String>,
        ext: impl Into<String>,
        file_type: FileType,
        origin_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            ext: ext.into(),
            file_type,
            origin_name: origin_name.into(),
        }
    }

    /// Key under which the file collaborator stores this attachment.
    pub fn key(&self) -> String {
        format!("{}{}", self.id, self.ext)
    }
}

/// A chat message as held by the conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileAttachment>,
    #[serde(default)]
    pub is_preset: bool,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            files: Vec::new(),
            is_preset: false,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn with_file(mut self, file: FileAttachment) -> Self {
        self.files.push(file);
        self
    }

    pub fn with_preset(mut self, is_preset: bool) -> Self {
        self.is_preset = is_preset;
        self
    }

    /// True when there is nothing to send for this message.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty() && self.files.is_empty()
    }
}
