use super::{
    AdapterConfig, CLASSIFY_PHOTO_PROMPT, ItemAnalysis, OutfitMatch, Provider, ProviderAdapter,
    ProviderPrompt, Recommendation, Transport, extract_as, match_outfit_prompt,
    recommendation_prompt,
};
use crate::config::AppConfig;
use crate::errors::{Error, Result};
use crate::models::{Item, Settings};
use std::sync::Arc;
use tracing::{info, instrument, warn};

const NO_RESPONSE: &str = "No response";
const EMPTY_OBJECT: &str = "{}";

/// The selected provider's adapter bound to a transport.
///
/// Every call is a single request with no retry.
pub struct ProviderClient {
    adapter: Box<dyn ProviderAdapter>,
    transport: Arc<dyn Transport>,
}

impl ProviderClient {
    /// Client over an explicit adapter and transport
    #[must_use]
    pub fn new(adapter: Box<dyn ProviderAdapter>, transport: Arc<dyn Transport>) -> Self {
        Self { adapter, transport }
    }

    /// Client for the provider chosen in `settings`.
    ///
    /// The OpenRouter model stored in settings wins over the configured one.
    ///
    /// # Errors
    /// [`Error::MissingApiKey`] when the selected provider has no key.
    pub fn from_settings(
        settings: &Settings,
        config: &AppConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let provider = settings.selected_provider;
        let api_key = settings
            .selected_api_key()
            .ok_or_else(|| Error::MissingApiKey {
                provider: provider.label().to_string(),
            })?;

        let endpoint = config.providers.for_provider(provider);
        let user_model = match provider {
            Provider::OpenRouter => settings
                .openrouter_model
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty()),
            _ => None,
        };

        let adapter = provider.adapter(AdapterConfig {
            api_key: api_key.to_string(),
            base_url: endpoint.base_url.clone(),
            model: user_model.map(str::to_string).or_else(|| endpoint.model.clone()),
        });

        Ok(Self::new(adapter, transport))
    }

    /// Provider behind this client
    #[must_use]
    pub fn provider(&self) -> Provider {
        self.adapter.provider()
    }

    /// Sends a prompt and returns the first text field of the reply, if any.
    pub async fn complete(&self, prompt: &ProviderPrompt) -> Result<Option<String>> {
        let request = self.adapter.format_request(prompt);
        let response = self.transport.send(request).await?;
        let text = self.adapter.parse_response(&response)?;
        if text.is_none() {
            warn!(provider = self.provider().as_str(), "Reply had no text field");
        }
        Ok(text)
    }

    /// Asks for an outfit for `occasion` built from `items`.
    #[instrument(
        skip(self, items, preferences),
        fields(provider = self.provider().as_str(), items = items.len())
    )]
    pub async fn recommend_outfit(
        &self,
        items: &[Item],
        occasion: &str,
        preferences: &str,
    ) -> Result<Recommendation> {
        let prompt = ProviderPrompt::text(recommendation_prompt(items, occasion, preferences)?);
        let text = self
            .complete(&prompt)
            .await?
            .unwrap_or_else(|| NO_RESPONSE.to_string());

        let recommendation = Recommendation::from_reply(text);
        info!(
            recommended = recommendation.item_ids.len(),
            "Outfit recommendation received"
        );
        Ok(recommendation)
    }

    /// Suggests attributes for a garment photo. An unusable reply is an
    /// empty analysis, not an error.
    #[instrument(skip_all, fields(provider = self.provider().as_str()))]
    pub async fn classify_photo(&self, image: &str) -> Result<ItemAnalysis> {
        let prompt = ProviderPrompt::with_image(CLASSIFY_PHOTO_PROMPT, image);
        let text = self
            .complete(&prompt)
            .await?
            .unwrap_or_else(|| EMPTY_OBJECT.to_string());

        let analysis: ItemAnalysis = extract_as(&text);
        if analysis.is_empty() {
            warn!("Photo analysis returned nothing usable");
        }
        Ok(analysis)
    }

    /// Ids of wardrobe items that recreate the outfit in `image`, in wardrobe
    /// order. Ids the model names that are not in `items` are dropped.
    #[instrument(
        skip_all,
        fields(provider = self.provider().as_str(), items = items.len())
    )]
    pub async fn match_outfit_photo(&self, image: &str, items: &[Item]) -> Result<Vec<i64>> {
        let prompt = ProviderPrompt::with_image(match_outfit_prompt(items)?, image);
        let text = self
            .complete(&prompt)
            .await?
            .unwrap_or_else(|| EMPTY_OBJECT.to_string());

        let matched: OutfitMatch = extract_as(&text);
        let ids: Vec<i64> = items
            .iter()
            .map(|item| item.id)
            .filter(|id| matched.matched_item_ids.contains(id))
            .collect();
        info!(
            named = matched.matched_item_ids.len(),
            matched = ids.len(),
            "Outfit photo matched"
        );
        Ok(ids)
    }
}
