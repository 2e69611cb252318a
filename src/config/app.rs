//! Application configuration loading from `hangar.toml`
//!
//! The file is optional. It lets a deployment point providers at different
//! base URLs or models and name the image-generation backend used by online
//! try-on. API keys are never read from here; they live in the settings row.

use crate::errors::{Error, Result};
use crate::providers::Provider;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default config file name, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "hangar.toml";

/// Top-level structure of `hangar.toml`
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Per-provider endpoint overrides
    pub providers: ProviderOverrides,
    /// Online try-on backend
    pub try_on: TryOnConfig,
}

/// Overrides for each provider's built-in endpoint and model
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProviderOverrides {
    /// `[providers.openai]`
    pub openai: ProviderEndpoint,
    /// `[providers.gemini]`
    pub gemini: ProviderEndpoint,
    /// `[providers.anthropic]`
    pub anthropic: ProviderEndpoint,
    /// `[providers.openrouter]`
    pub openrouter: ProviderEndpoint,
}

impl ProviderOverrides {
    /// Overrides for one provider
    #[must_use]
    pub const fn for_provider(&self, provider: Provider) -> &ProviderEndpoint {
        match provider {
            Provider::OpenAi => &self.openai,
            Provider::Gemini => &self.gemini,
            Provider::Anthropic => &self.anthropic,
            Provider::OpenRouter => &self.openrouter,
        }
    }
}

/// Optional base URL and model for one provider
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProviderEndpoint {
    /// Replaces the scheme/host/path prefix of the provider URL
    pub base_url: Option<String>,
    /// Replaces the provider's default model
    pub model: Option<String>,
}

/// Image-generation backend for online try-on
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TryOnConfig {
    /// Endpoint accepting the person and garment images; unset means no backend
    pub endpoint: Option<String>,
}

/// Loads configuration from a TOML file. A missing file yields defaults.
///
/// # Errors
/// Returns [`Error::Config`] if the file exists but cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;

    let config = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.display()),
    })?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Loads configuration from `HANGAR_CONFIG`, or `./hangar.toml` when unset.
pub fn load_default_config() -> Result<AppConfig> {
    let path = std::env::var("HANGAR_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_config(path)
}
