//! Model metadata supplied by the caller.

use serde::{Deserialize, Serialize};

/// Capability flags of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCapabilities {
    pub vision: bool,
    pub reasoning: bool,
    pub streaming: bool,
}

impl Default for ModelCapabilities {
    fn default() -> Self {
        Self {
            vision: false,
            reasoning: false,
            streaming: true,
        }
    }
}

/// A model as selected by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    /// Provider the model belongs to
    pub provider: String,
    #[serde(default)]
    pub capabilities: ModelCapabilities,
}

impl ModelInfo {
    pub fn new(id: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            provider: provider.into(),
            capabilities: ModelCapabilities::default(),
        }
    }

    pub fn with_vision(mut self, vision: bool) -> Self {
        self.capabilities.vision = vision;
        self
    }

    pub fn with_reasoning(mut self, reasoning: bool) -> Self {
        self.capabilities.reasoning = reasoning;
        self
    }

    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.capabilities.streaming = streaming;
        self
    }
}

/// Entry of a provider's model listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub id: String,
    pub owned_by: Option<String>,
    pub created: Option<chrono::DateTime<chrono::Utc>>,
}
