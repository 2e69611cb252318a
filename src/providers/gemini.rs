use super::{AdapterConfig, HttpRequest, Provider, ProviderAdapter, ProviderPrompt};
use serde_json::{Value, json};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini `generateContent`, keyed through the `key` query parameter
#[derive(Debug, Clone)]
pub struct GeminiAdapter {
    config: AdapterConfig,
}

impl GeminiAdapter {
    /// Adapter for the given key and overrides
    #[must_use]
    pub const fn new(config: AdapterConfig) -> Self {
        Self { config }
    }
}

impl ProviderAdapter for GeminiAdapter {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    fn format_request(&self, prompt: &ProviderPrompt) -> HttpRequest {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url_or(BASE_URL),
            self.config.model_or(DEFAULT_MODEL)
        );

        let mut parts = vec![json!({ "text": prompt.text })];
        if let Some(image) = &prompt.image {
            parts.push(json!({
                "inline_data": {
                    "mime_type": image.mime_type,
                    "data": image.base64_data
                }
            }));
        }

        HttpRequest::post(url, json!({ "contents": [{ "parts": parts }] }))
            .query("key", self.config.api_key.clone())
    }

    fn extract_text(&self, body: &Value) -> Option<String> {
        body.pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn error_message(&self, body: &Value) -> Option<String> {
        let error = body.get("error")?;
        error
            .get("message")
            .or_else(|| error.get("status"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::providers::HttpResponse;

    #[test]
    fn test_request_puts_key_in_query() {
        let adapter = GeminiAdapter::new(AdapterConfig::with_key("g-key"));
        let request = adapter.format_request(&ProviderPrompt::text("hello"));

        assert_eq!(
            request.url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(request.query, vec![("key".to_string(), "g-key".to_string())]);
        assert!(request.headers.is_empty());
        assert_eq!(request.body, json!({ "contents": [{ "parts": [{ "text": "hello" }] }] }));
    }

    #[test]
    fn test_image_is_inline_data_part() {
        let adapter = GeminiAdapter::new(AdapterConfig::with_key("g-key"));
        let prompt = ProviderPrompt::with_image("classify", "data:image/webp;base64,UklG");
        let request = adapter.format_request(&prompt);

        let parts = &request.body["contents"][0]["parts"];
        assert_eq!(
            parts[1],
            json!({ "inline_data": { "mime_type": "image/webp", "data": "UklG" } })
        );
    }

    #[test]
    fn test_extract_text() {
        let adapter = GeminiAdapter::new(AdapterConfig::with_key("k"));
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"color\":\"red\"}" }] } }]
        });
        assert_eq!(adapter.extract_text(&body).as_deref(), Some("{\"color\":\"red\"}"));
    }

    #[test]
    fn test_error_falls_back_to_status() {
        let adapter = GeminiAdapter::new(AdapterConfig::with_key("k"));
        let response = HttpResponse {
            status: 403,
            body: r#"{"error":{"code":403,"status":"PERMISSION_DENIED"}}"#.to_string(),
        };
        let err = adapter.parse_response(&response).unwrap_err();
        assert_eq!(err.to_string(), "Gemini Error: PERMISSION_DENIED");
    }
}
