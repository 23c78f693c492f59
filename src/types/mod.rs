//! Data model shared by every component.

pub mod assistant;
pub mod event;
pub mod image;
pub mod message;
pub mod model;
pub mod wire;

pub use assistant::{AssistantSettings, ReasoningEffort};
pub use event::{CompletionSummary, EventKind, NormalizedEvent, StreamMetrics, Usage};
pub use image::ImageRequest;
pub use message::{FileAttachment, FileType, Message, MessageRole};
pub use model::{ModelCapabilities, ModelDescriptor, ModelInfo};
pub use wire::{ContentPart, ImageUrl, WireContent, WireMessage};
