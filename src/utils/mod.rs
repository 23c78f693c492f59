//! Utility modules

pub mod cancel;
pub mod mime;

pub use cancel::{AbortHandle, CancellationMonitor, PauseRegistry, PauseSignal, StreamKey};
