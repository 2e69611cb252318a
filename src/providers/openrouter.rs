use super::openai::{chat_completions_body, chat_completions_text};
use super::{AdapterConfig, HttpRequest, Provider, ProviderAdapter, ProviderPrompt};
use serde_json::Value;

const BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-001";
const REFERER: &str = "https://hangar.app";
const TITLE: &str = "Hangar";

/// OpenRouter: the OpenAI wire format plus attribution headers, any model id.
#[derive(Debug, Clone)]
pub struct OpenRouterAdapter {
    config: AdapterConfig,
}

impl OpenRouterAdapter {
    /// Adapter for the given key and overrides
    #[must_use]
    pub const fn new(config: AdapterConfig) -> Self {
        Self { config }
    }
}

impl ProviderAdapter for OpenRouterAdapter {
    fn provider(&self) -> Provider {
        Provider::OpenRouter
    }

    fn format_request(&self, prompt: &ProviderPrompt) -> HttpRequest {
        let url = format!("{}/chat/completions", self.config.base_url_or(BASE_URL));
        let body = chat_completions_body(&self.config.model_or(DEFAULT_MODEL), prompt);

        HttpRequest::post(url, body)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("HTTP-Referer", REFERER)
            .header("X-Title", TITLE)
    }

    fn extract_text(&self, body: &Value) -> Option<String> {
        chat_completions_text(body)
    }
}
