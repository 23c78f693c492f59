//! File access collaborator.

use crate::error::LlmError;
use crate::utils::mime::guess_mime;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::PathBuf;

/// Reads attachment content on demand.
#[async_trait]
pub trait FileAccess: Send + Sync {
    /// Read a file as UTF-8 text.
    async fn read(&self, file_key: &str) -> Result<String, LlmError>;

    /// Read an image as a `data:` URL.
    async fn read_as_inline_image(&self, file_key: &str) -> Result<String, LlmError>;
}

/// Reads attachments from a local directory, one file per key.
#[derive(Debug, Clone)]
pub struct LocalFileAccess {
    root: PathBuf,
}

impl LocalFileAccess {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, file_key: &str) -> Result<PathBuf, LlmError> {
        // keys are flat file names
        if file_key.is_empty() || file_key.contains(['/', '\\']) || file_key.starts_with("..") {
            return Err(LlmError::file_error(file_key, "invalid file key"));
        }
        Ok(self.root.join(file_key))
    }
}

#[async_trait]
impl FileAccess for LocalFileAccess {
    async fn read(&self, file_key: &str) -> Result<String, LlmError> {
        let path = self.path_for(file_key)?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| LlmError::file_error(file_key, e.to_string()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn read_as_inline_image(&self, file_key: &str) -> Result<String, LlmError> {
        let path = self.path_for(file_key)?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| LlmError::file_error(file_key, e.to_string()))?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let mime = guess_mime(ext, &bytes);
        Ok(format!("data:{mime};base64,{}", STANDARD.encode(&bytes)))
    }
}
