//! Provider Configuration
//!
//! Connection settings for one OpenAI-compatible provider.

use super::capabilities::ProviderCapabilities;
use crate::error::LlmError;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

/// Configuration for an OpenAI-compatible provider
#[derive(Clone)]
pub struct ProviderConfig {
    /// Provider identifier, also the key into the capability table
    pub id: String,
    /// API key (securely stored)
    pub api_key: SecretString,
    /// Base URL without trailing slash, e.g. `https://api.openai.com/v1`
    pub base_url: String,
    /// Extra headers sent with every request
    pub custom_headers: reqwest::header::HeaderMap,
    /// Whole-request timeout enforced by the HTTP client
    pub timeout: Option<Duration>,
    pub capabilities: ProviderCapabilities,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("id", &self.id)
            .field(
                "api_key_present",
                &(!self.api_key.expose_secret().is_empty()),
            )
            .field("base_url", &self.base_url)
            .field("custom_headers", &self.custom_headers.len())
            .field("timeout", &self.timeout)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

impl ProviderConfig {
    /// Create a new configuration. Capabilities are looked up by `id`.
    pub fn new(id: &str, api_key: &str, base_url: &str) -> Self {
        Self {
            id: id.to_string(),
            api_key: SecretString::from(api_key.to_string()),
            base_url: base_url.trim_end_matches('/').to_string(),
            custom_headers: reqwest::header::HeaderMap::new(),
            timeout: None,
            capabilities: ProviderCapabilities::lookup(id),
        }
    }

    /// Build from `<ID>_API_KEY` and `<ID>_BASE_URL`, falling back to the
    /// provider's default base URL.
    pub fn from_env(id: &str) -> Result<Self, LlmError> {
        let prefix = id.to_uppercase().replace(['-', '.'], "_");
        let key_var = format!("{prefix}_API_KEY");
        let api_key =
            std::env::var(&key_var).map_err(|_| LlmError::MissingApiKey(key_var.clone()))?;
        let base_url = match std::env::var(format!("{prefix}_BASE_URL")) {
            Ok(url) => url,
            Err(_) => ProviderCapabilities::lookup(id)
                .default_base_url
                .map(str::to_string)
                .ok_or_else(|| {
                    LlmError::ConfigurationError(format!(
                        "No base URL for provider '{id}', set {prefix}_BASE_URL"
                    ))
                })?,
        };
        let config = Self::new(id, &api_key, &base_url);
        config.validate()?;
        Ok(config)
    }

    /// Add a custom header
    pub fn with_header(mut self, key: &str, value: &str) -> Result<Self, LlmError> {
        let header_name = reqwest::header::HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| LlmError::ConfigurationError(format!("Invalid header name: {e}")))?;
        let header_value = reqwest::header::HeaderValue::from_str(value)
            .map_err(|e| LlmError::ConfigurationError(format!("Invalid header value: {e}")))?;

        self.custom_headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the looked-up capability descriptor
    pub fn with_capabilities(mut self, capabilities: ProviderCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), LlmError> {
        if self.id.is_empty() {
            return Err(LlmError::ConfigurationError(
                "Provider ID cannot be empty".to_string(),
            ));
        }

        if self.api_key.expose_secret().is_empty() {
            return Err(LlmError::MissingApiKey(self.id.clone()));
        }

        if self.base_url.is_empty() {
            return Err(LlmError::ConfigurationError(
                "Base URL cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(LlmError::ConfigurationError(
                "Base URL must start with http:// or https://".to_string(),
            ));
        }

        Ok(())
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
