use super::{AdapterConfig, HttpRequest, Provider, ProviderAdapter, ProviderPrompt};
use serde_json::{Value, json};

const BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o";
const IMAGE_MAX_TOKENS: u32 = 300;

/// `/chat/completions` body shared with OpenAI-compatible providers.
pub(super) fn chat_completions_body(model: &str, prompt: &ProviderPrompt) -> Value {
    match &prompt.image {
        Some(image) => json!({
            "model": model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": prompt.text },
                    { "type": "image_url", "image_url": { "url": image.data_url() } }
                ]
            }],
            "max_tokens": IMAGE_MAX_TOKENS
        }),
        None => json!({
            "model": model,
            "messages": [{ "role": "user", "content": prompt.text }]
        }),
    }
}

/// `choices[0].message.content`
pub(super) fn chat_completions_text(body: &Value) -> Option<String> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// OpenAI chat completions with bearer auth
#[derive(Debug, Clone)]
pub struct OpenAiAdapter {
    config: AdapterConfig,
}

impl OpenAiAdapter {
    /// Adapter for the given key and overrides
    #[must_use]
    pub const fn new(config: AdapterConfig) -> Self {
        Self { config }
    }
}

impl ProviderAdapter for OpenAiAdapter {
    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    fn format_request(&self, prompt: &ProviderPrompt) -> HttpRequest {
        let url = format!("{}/chat/completions", self.config.base_url_or(BASE_URL));
        let body = chat_completions_body(&self.config.model_or(DEFAULT_MODEL), prompt);

        HttpRequest::post(url, body)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
    }

    fn extract_text(&self, body: &Value) -> Option<String> {
        chat_completions_text(body)
    }
}
