//! Provider capability descriptor table.
//!
//! Every provider-specific quirk the resolver and encoder care about is an
//! explicit field here, looked up once per client instead of comparing
//! provider ids throughout the request path.

use serde_json::{Map, Value, json};

/// How a provider expects web search to be switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebSearchStyle {
    /// Provider has no web search switch
    Unsupported,
    /// `web_search_options: {}` (OpenAI search models)
    WebSearchOptions,
    /// `plugins: [{"id": "web"}]` (OpenRouter)
    WebPlugin,
    /// `enable_search: true` (DashScope)
    EnableSearch,
    /// `enable_enhancement` + `citation` + `search_info` (Hunyuan)
    Enhancement,
}

impl WebSearchStyle {
    /// Request fields that switch web search on.
    pub fn parameters(&self) -> Map<String, Value> {
        let value = match self {
            Self::Unsupported => json!({}),
            Self::WebSearchOptions => json!({ "web_search_options": {} }),
            Self::WebPlugin => json!({ "plugins": [{ "id": "web" }] }),
            Self::EnableSearch => json!({ "enable_search": true }),
            Self::Enhancement => json!({
                "enable_enhancement": true,
                "citation": true,
                "search_info": true
            }),
        };
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

/// What a provider supports on its OpenAI-compatible endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderCapabilities {
    /// Accepts multi-part content with inline files and images
    pub supports_files: bool,
    /// Accepts `reasoning_effort` for reasoning models
    pub reasoning_controls: bool,
    /// Model-id substrings that need `include_reasoning: true`
    pub include_reasoning_models: &'static [&'static str],
    pub web_search: WebSearchStyle,
    pub default_base_url: Option<&'static str>,
}

impl ProviderCapabilities {
    /// Descriptor used for providers missing from the table.
    pub const OPENAI_COMPATIBLE: Self = Self {
        supports_files: true,
        reasoning_controls: true,
        include_reasoning_models: &[],
        web_search: WebSearchStyle::Unsupported,
        default_base_url: None,
    };

    /// Look up the descriptor for a provider id.
    pub fn lookup(provider_id: &str) -> Self {
        PROVIDER_TABLE
            .iter()
            .find(|(id, _)| *id == provider_id)
            .map(|(_, caps)| *caps)
            .unwrap_or(Self::OPENAI_COMPATIBLE)
    }

    /// Whether the model needs the `include_reasoning` flag.
    pub fn requires_include_reasoning(&self, model_id: &str) -> bool {
        self.include_reasoning_models
            .iter()
            .any(|needle| model_id.contains(needle))
    }

    pub fn with_files(mut self, supports_files: bool) -> Self {
        self.supports_files = supports_files;
        self
    }

    pub fn with_reasoning_controls(mut self, enabled: bool) -> Self {
        self.reasoning_controls = enabled;
        self
    }

    pub fn with_web_search(mut self, style: WebSearchStyle) -> Self {
        self.web_search = style;
        self
    }
}

impl Default for ProviderCapabilities {
    fn default() -> Self {
        Self::OPENAI_COMPATIBLE
    }
}

const fn entry(
    supports_files: bool,
    reasoning_controls: bool,
    web_search: WebSearchStyle,
    default_base_url: &'static str,
) -> ProviderCapabilities {
    ProviderCapabilities {
        supports_files,
        reasoning_controls,
        include_reasoning_models: &[],
        web_search,
        default_base_url: Some(default_base_url),
    }
}

static PROVIDER_TABLE: &[(&str, ProviderCapabilities)] = &[
    (
        "openai",
        entry(
            true,
            true,
            WebSearchStyle::WebSearchOptions,
            "https://api.openai.com/v1",
        ),
    ),
    (
        "openrouter",
        ProviderCapabilities {
            include_reasoning_models: &["deepseek-r1"],
            ..entry(
                true,
                true,
                WebSearchStyle::WebPlugin,
                "https://openrouter.ai/api/v1",
            )
        },
    ),
    (
        "deepseek",
        entry(
            false,
            true,
            WebSearchStyle::Unsupported,
            "https://api.deepseek.com/v1",
        ),
    ),
    (
        "groq",
        entry(
            true,
            false,
            WebSearchStyle::Unsupported,
            "https://api.groq.com/openai/v1",
        ),
    ),
    (
        "dashscope",
        entry(
            true,
            true,
            WebSearchStyle::EnableSearch,
            "https://dashscope.aliyuncs.com/compatible-mode/v1",
        ),
    ),
    (
        "hunyuan",
        entry(
            true,
            true,
            WebSearchStyle::Enhancement,
            "https://api.hunyuan.cloud.tencent.com/v1",
        ),
    ),
    (
        "baichuan",
        entry(
            false,
            true,
            WebSearchStyle::Unsupported,
            "https://api.baichuan-ai.com/v1",
        ),
    ),
    (
        "minimax",
        entry(
            false,
            true,
            WebSearchStyle::Unsupported,
            "https://api.minimax.chat/v1",
        ),
    ),
    (
        "xirang",
        entry(
            false,
            true,
            WebSearchStyle::Unsupported,
            "https://wishub-x1.ctyun.cn/v1",
        ),
    ),
    (
        "silicon",
        entry(
            true,
            true,
            WebSearchStyle::Unsupported,
            "https://api.siliconflow.cn/v1",
        ),
    ),
    (
        "perplexity",
        entry(
            true,
            true,
            WebSearchStyle::Unsupported,
            "https://api.perplexity.ai",
        ),
    ),
    (
        "ollama",
        entry(
            true,
            true,
            WebSearchStyle::Unsupported,
            "http://localhost:11434/v1",
        ),
    ),
];
