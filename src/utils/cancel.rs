//! Cancellation utilities
//!
//! Two mechanisms live here. Chat streams are stopped cooperatively: a
//! [`CancellationMonitor`] is polled before each chunk is pulled, so a pause
//! recorded in a [`PauseSignal`] store ends the stream at the next boundary.
//! One-shot operations such as image generation take an [`AbortHandle`] whose
//! token is raced against the request.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Identifies one in-flight stream in the pause store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamKey(String);

impl StreamKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// A fresh random key.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StreamKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Read side of a pause store.
pub trait PauseSignal: Send + Sync {
    fn is_paused(&self, key: &StreamKey) -> bool;
}

/// In-memory pause store shared between the UI side and running streams.
#[derive(Debug, Default)]
pub struct PauseRegistry {
    paused: RwLock<HashSet<StreamKey>>,
}

impl PauseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the stream registered under `key` to stop.
    pub fn pause(&self, key: &StreamKey) {
        self.write().insert(key.clone());
    }

    /// Clear a pause so the key can be reused.
    pub fn resume(&self, key: &StreamKey) {
        self.write().remove(key);
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    // Poisoning is ignored: every write is a single set operation.
    fn write(&self) -> RwLockWriteGuard<'_, HashSet<StreamKey>> {
        self.paused.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PauseSignal for PauseRegistry {
    fn is_paused(&self, key: &StreamKey) -> bool {
        self.paused
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }
}

/// Checked between chunks; once it reports a stop the stream is abandoned.
#[derive(Clone)]
pub struct CancellationMonitor {
    store: Arc<dyn PauseSignal>,
    key: StreamKey,
}

impl CancellationMonitor {
    pub fn new(store: Arc<dyn PauseSignal>, key: StreamKey) -> Self {
        Self { store, key }
    }

    pub fn key(&self) -> &StreamKey {
        &self.key
    }

    pub fn should_stop(&self) -> bool {
        let paused = self.store.is_paused(&self.key);
        if paused {
            tracing::info!(stream_key = %self.key, "stream paused, stopping");
        }
        paused
    }
}

impl fmt::Debug for CancellationMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellationMonitor")
            .field("key", &self.key)
            .finish()
    }
}

/// A handle that can be used to request cancellation of a one-shot operation.
#[derive(Clone, Debug, Default)]
pub struct AbortHandle {
    token: CancellationToken,
}

impl AbortHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. The operation observing this handle returns
    /// `LlmError::Aborted` and its HTTP request is dropped.
    pub fn abort(&self) {
        self.token.cancel();
    }

    pub fn is_aborted(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once [`abort`](Self::abort) has been called.
    pub async fn aborted(&self) {
        self.token.cancelled().await
    }
}
