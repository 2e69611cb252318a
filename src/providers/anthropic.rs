use super::{AdapterConfig, HttpRequest, Provider, ProviderAdapter, ProviderPrompt};
use serde_json::{Value, json};

const BASE_URL: &str = "https://api.anthropic.com/v1";
const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20240620";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

/// Anthropic messages API
#[derive(Debug, Clone)]
pub struct AnthropicAdapter {
    config: AdapterConfig,
}

impl AnthropicAdapter {
    /// Adapter for the given key and overrides
    #[must_use]
    pub const fn new(config: AdapterConfig) -> Self {
        Self { config }
    }
}

impl ProviderAdapter for AnthropicAdapter {
    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    fn format_request(&self, prompt: &ProviderPrompt) -> HttpRequest {
        let url = format!("{}/messages", self.config.base_url_or(BASE_URL));

        let mut content = vec![json!({ "type": "text", "text": prompt.text })];
        if let Some(image) = &prompt.image {
            content.push(json!({
                "type": "image",
                "source": {
                    "type": "base64",
                    "media_type": image.mime_type,
                    "data": image.base64_data
                }
            }));
        }

        let body = json!({
            "model": self.config.model_or(DEFAULT_MODEL),
            "max_tokens": MAX_TOKENS,
            "messages": [{ "role": "user", "content": content }]
        });

        HttpRequest::post(url, body)
            .header("x-api-key", self.config.api_key.clone())
            .header("anthropic-version", API_VERSION)
    }

    fn extract_text(&self, body: &Value) -> Option<String> {
        body.pointer("/content/0/text")
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_headers_and_body() {
        let adapter = AnthropicAdapter::new(AdapterConfig::with_key("ant-key"));
        let request = adapter.format_request(&ProviderPrompt::text("style me"));

        assert_eq!(request.url, "https://api.anthropic.com/v1/messages");
        assert_eq!(request.header_value("x-api-key"), Some("ant-key"));
        assert_eq!(request.header_value("anthropic-version"), Some(API_VERSION));
        assert_eq!(request.header_value("Authorization"), None);
        assert_eq!(request.body["model"], DEFAULT_MODEL);
        assert_eq!(request.body["max_tokens"], 1024);
        assert_eq!(
            request.body["messages"][0]["content"],
            json!([{ "type": "text", "text": "style me" }])
        );
    }

    #[test]
    fn test_image_block_is_base64_source() {
        let adapter = AnthropicAdapter::new(AdapterConfig::with_key("k"));
        let prompt = ProviderPrompt::with_image("what", "data:image/jpeg;base64,/9j/");
        let request = adapter.format_request(&prompt);

        assert_eq!(
            request.body["messages"][0]["content"][1],
            json!({
                "type": "image",
                "source": { "type": "base64", "media_type": "image/jpeg", "data": "/9j/" }
            })
        );
    }

    #[test]
    fn test_extract_text() {
        let adapter = AnthropicAdapter::new(AdapterConfig::with_key("k"));
        let body = json!({ "content": [{ "type": "text", "text": "done" }] });
        assert_eq!(adapter.extract_text(&body).as_deref(), Some("done"));
        assert_eq!(adapter.extract_text(&json!({ "content": [] })), None);
    }
}
