//! Application context handed to the presentation layer at startup.
//!
//! Holds what screens share: the store connection, the loaded configuration
//! and the UI preferences. Nothing here is global; the UI owns one
//! [`AppContext`] and passes it where needed.

use crate::config::{self, AppConfig};
use crate::core;
use crate::errors::Result;
use crate::models::Settings;
use crate::providers::{ProviderClient, Transport};
use crate::theme::UiPreferences;
use crate::tryon::TryOnService;
use dotenvy::dotenv;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{error, info};

/// Shared state for all screens
pub struct AppContext {
    database: DatabaseConnection,
    config: AppConfig,
    preferences: UiPreferences,
}

impl AppContext {
    /// Context over an already-open store
    #[must_use]
    pub fn with_database(database: DatabaseConnection, config: AppConfig) -> Self {
        Self {
            database,
            config,
            preferences: UiPreferences::default(),
        }
    }

    /// Full startup sequence: logging, `.env`, config file, store, then the
    /// first-launch settings row.
    ///
    /// # Errors
    /// [`crate::errors::Error::StoreInit`] when the store cannot be opened;
    /// the UI should treat this as fatal. A malformed config file is
    /// [`crate::errors::Error::Config`].
    pub async fn bootstrap() -> Result<Self> {
        config::logging::init_tracing();

        // Non-fatal, env vars can be set externally
        dotenv().ok();

        let app_config = config::load_default_config()
            .inspect_err(|e| error!("Failed to load configuration: {e}"))?;

        let database_url = config::database::get_database_url();
        let database = config::database::init_store(&database_url).await?;

        let settings = core::ensure_default_settings(&database).await?;
        info!(
            provider = settings.selected_provider.as_str(),
            onboarding_complete = settings.onboarding_complete,
            "Application context ready"
        );

        Ok(Self::with_database(database, app_config))
    }

    /// Store connection
    #[must_use]
    pub const fn database(&self) -> &DatabaseConnection {
        &self.database
    }

    /// Loaded configuration
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Current UI preferences
    #[must_use]
    pub const fn preferences(&self) -> &UiPreferences {
        &self.preferences
    }

    /// Mutable UI preferences
    pub fn preferences_mut(&mut self) -> &mut UiPreferences {
        &mut self.preferences
    }

    /// Replaces the UI preferences
    pub fn set_preferences(&mut self, preferences: UiPreferences) {
        self.preferences = preferences;
    }

    /// Current settings, creating the defaults if none exist yet.
    pub async fn settings(&self) -> Result<Settings> {
        core::ensure_default_settings(&self.database).await
    }

    /// Provider client for whatever is selected in settings right now.
    pub async fn provider_client(&self, transport: Arc<dyn Transport>) -> Result<ProviderClient> {
        let settings = self.settings().await?;
        ProviderClient::from_settings(&settings, &self.config, transport)
    }

    /// Try-on service using the configured backend, if any
    #[must_use]
    pub fn try_on_service(&self, transport: Arc<dyn Transport>) -> TryOnService {
        TryOnService::from_config(&self.config, transport)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::save_settings;
    use crate::errors::Error;
    use crate::providers::Provider;
    use crate::test_utils::{CannedTransport, setup_test_db};

    #[tokio::test]
    async fn test_preferences_accessors() -> Result<()> {
        let mut ctx = AppContext::with_database(setup_test_db().await?, AppConfig::default());
        assert_eq!(ctx.preferences().theme_seed, "#A35C4E");

        ctx.preferences_mut().dark_mode = true;
        assert!(ctx.preferences().dark_mode);

        ctx.set_preferences(UiPreferences {
            theme_seed: "#336699".to_string(),
            dark_mode: false,
            signed_in: true,
        });
        assert!(ctx.preferences().signed_in);
        assert_eq!(ctx.preferences().theme_seed, "#336699");
        Ok(())
    }

    #[tokio::test]
    async fn test_provider_client_follows_settings() -> Result<()> {
        let ctx = AppContext::with_database(setup_test_db().await?, AppConfig::default());
        let transport: Arc<dyn Transport> = Arc::new(CannedTransport::new(200, "{}"));

        // Defaults select Gemini with no key
        let result = ctx.provider_client(Arc::clone(&transport)).await;
        assert!(matches!(result.err().unwrap(), Error::MissingApiKey { .. }));

        save_settings(
            ctx.database(),
            Settings {
                selected_provider: Provider::Anthropic,
                anthropic_key: Some("ant-key".to_string()),
                ..Settings::default()
            },
        )
        .await?;

        let client = ctx.provider_client(transport).await?;
        assert_eq!(client.provider(), Provider::Anthropic);
        Ok(())
    }
}
