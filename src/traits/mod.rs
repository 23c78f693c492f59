//! Collaborator traits
//!
//! The orchestrator talks to the outside world only through these seams, so
//! each can be swapped for a scripted double in tests.

mod handler;
mod settings;
mod transport;

pub use crate::encoding::FileAccess;
pub use crate::utils::cancel::PauseSignal;
pub use handler::CompletionHandler;
pub use settings::{SettingsStore, StaticSettings};
pub use transport::{CompletionResponse, CompletionTransport};
