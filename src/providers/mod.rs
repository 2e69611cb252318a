//! Provider adapter - language/vision model providers behind one interface.
//!
//! Each provider is a [`ProviderAdapter`] that turns a [`ProviderPrompt`] into
//! an [`HttpRequest`] and pulls the first text field out of an
//! [`HttpResponse`]. The adapter is chosen once from [`Provider`]; call sites
//! never branch on provider names. Sending happens through a [`Transport`],
//! one attempt, no retry.

mod anthropic;
mod client;
mod extract;
mod gemini;
mod openai;
mod openrouter;
mod prompt;
mod results;
mod transport;

pub use anthropic::AnthropicAdapter;
pub use client::ProviderClient;
pub use extract::{extract_as, extract_json};
pub use gemini::GeminiAdapter;
pub use openai::OpenAiAdapter;
pub use openrouter::OpenRouterAdapter;
pub use prompt::{
    CLASSIFY_PHOTO_PROMPT, ImageAttachment, ProviderPrompt, match_outfit_prompt,
    recommendation_prompt,
};
pub use results::{ItemAnalysis, OutfitMatch, Recommendation};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

use crate::errors::{Error, Result};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The model providers a user can pick in settings
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// OpenAI chat completions
    #[sea_orm(string_value = "openai")]
    OpenAi,
    /// Google Gemini `generateContent`
    #[sea_orm(string_value = "gemini")]
    Gemini,
    /// Anthropic messages
    #[sea_orm(string_value = "anthropic")]
    Anthropic,
    /// OpenRouter, OpenAI-compatible with any model id
    #[sea_orm(string_value = "openrouter")]
    OpenRouter,
}

impl Provider {
    /// Storage and settings identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Anthropic => "anthropic",
            Self::OpenRouter => "openrouter",
        }
    }

    /// Human-readable name used in error messages
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Gemini => "Gemini",
            Self::Anthropic => "Anthropic",
            Self::OpenRouter => "OpenRouter",
        }
    }

    /// Builds the adapter for this provider.
    #[must_use]
    pub fn adapter(self, config: AdapterConfig) -> Box<dyn ProviderAdapter> {
        match self {
            Self::OpenAi => Box::new(OpenAiAdapter::new(config)),
            Self::Gemini => Box::new(GeminiAdapter::new(config)),
            Self::Anthropic => Box::new(AnthropicAdapter::new(config)),
            Self::OpenRouter => Box::new(OpenRouterAdapter::new(config)),
        }
    }
}

/// Key plus optional overrides an adapter is built from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Provider API key
    pub api_key: String,
    /// Replaces the built-in base URL
    pub base_url: Option<String>,
    /// Replaces the built-in model
    pub model: Option<String>,
}

impl AdapterConfig {
    /// Config with only an API key
    #[must_use]
    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub(crate) fn base_url_or(&self, default: &str) -> String {
        self.base_url
            .as_deref()
            .unwrap_or(default)
            .trim_end_matches('/')
            .to_string()
    }

    pub(crate) fn model_or(&self, default: &str) -> String {
        self.model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(default)
            .to_string()
    }
}

/// The per-provider request/response mapping.
pub trait ProviderAdapter: Send + Sync {
    /// Which provider this adapter speaks to
    fn provider(&self) -> Provider;

    /// Builds the HTTP call for a prompt, with the image inlined when present.
    fn format_request(&self, prompt: &ProviderPrompt) -> HttpRequest;

    /// Pulls the first text field out of a successful response body.
    /// Returns `None` when the body has no text in the expected place.
    fn extract_text(&self, body: &Value) -> Option<String>;

    /// Reads the provider's own error message from an error body.
    fn error_message(&self, body: &Value) -> Option<String> {
        body.pointer("/error/message")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Maps a response to its text, or to [`Error::Provider`] on a
    /// non-success status.
    fn parse_response(&self, response: &HttpResponse) -> Result<Option<String>> {
        let body: Option<Value> = serde_json::from_str(&response.body).ok();

        if !response.is_success() {
            let provider = self.provider();
            let message = body
                .as_ref()
                .and_then(|b| self.error_message(b))
                .unwrap_or_else(|| format!("Unknown {} Error", provider.label()));
            return Err(Error::Provider { provider, message });
        }

        Ok(body.as_ref().and_then(|b| self.extract_text(b)))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn test_provider_round_trips_through_storage_value() {
        for provider in Provider::iter() {
            assert_eq!(provider.to_value(), provider.as_str());
        }
    }

    #[test]
    fn test_adapter_matches_provider() {
        for provider in Provider::iter() {
            let adapter = provider.adapter(AdapterConfig::with_key("k"));
            assert_eq!(adapter.provider(), provider);
        }
    }

    #[test]
    fn test_non_success_without_message_uses_generic_label() {
        let adapter = Provider::OpenAi.adapter(AdapterConfig::with_key("k"));
        let response = HttpResponse {
            status: 500,
            body: "upstream exploded".to_string(),
        };

        let err = adapter.parse_response(&response).unwrap_err();
        assert_eq!(err.to_string(), "OpenAI Error: Unknown OpenAI Error");
    }

    #[test]
    fn test_non_success_forwards_provider_message() {
        let adapter = Provider::Anthropic.adapter(AdapterConfig::with_key("k"));
        let response = HttpResponse {
            status: 401,
            body: r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#
                .to_string(),
        };

        let err = adapter.parse_response(&response).unwrap_err();
        assert!(matches!(
            &err,
            Error::Provider { provider: Provider::Anthropic, message } if message == "invalid x-api-key"
        ));
        assert_eq!(err.to_string(), "Anthropic Error: invalid x-api-key");
    }

    #[test]
    fn test_success_with_unexpected_shape_is_none() {
        let adapter = Provider::Gemini.adapter(AdapterConfig::with_key("k"));
        let response = HttpResponse {
            status: 200,
            body: r#"{"candidates":[]}"#.to_string(),
        };
        assert_eq!(adapter.parse_response(&response).unwrap(), None);
    }

    #[test]
    fn test_model_override_ignores_blank() {
        let config = AdapterConfig {
            api_key: "k".to_string(),
            base_url: Some("http://localhost:1234/".to_string()),
            model: Some("  ".to_string()),
        };
        assert_eq!(config.model_or("default-model"), "default-model");
        assert_eq!(config.base_url_or("https://x"), "http://localhost:1234");
    }
}
