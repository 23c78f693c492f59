//! Provider descriptors and configuration.

pub mod capabilities;
pub mod config;

pub use capabilities::{ProviderCapabilities, WebSearchStyle};
pub use config::ProviderConfig;
