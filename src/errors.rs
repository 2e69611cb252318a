//! Unified error type for the wardrobe core.
//!
//! Storage, provider and parse failures all end up here. Model-output parse
//! failures are deliberately absent: they degrade to default values instead.

use thiserror::Error;

use crate::providers::Provider;

/// Every failure the data access layer, provider adapter, try-on and export
/// paths can surface to the presentation layer.
#[derive(Debug, Error)]
pub enum Error {
    /// The local store could not be opened or its schema created.
    #[error("Failed to initialize local store: {message}")]
    StoreInit {
        /// Underlying cause
        message: String,
    },

    /// A storage-engine failure during a read or write.
    #[error("Storage error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Input rejected before anything was written.
    #[error("Invalid input: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// The provider answered with a non-success status.
    #[error("{} Error: {}", .provider.label(), .message)]
    Provider {
        /// Which provider failed
        provider: Provider,
        /// Message forwarded from the provider, or a generic label
        message: String,
    },

    /// The request never produced a readable response.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The selected provider (or try-on backend) has no API key configured.
    #[error("No API key configured for {provider}")]
    MissingApiKey {
        /// Provider name as shown to the user
        provider: String,
    },

    /// Virtual try-on was requested while online try-on is switched off.
    #[error("Virtual try-on requires online try-on to be enabled in settings")]
    TryOnDisabled,

    /// The try-on backend rejected the request or sent back no image.
    #[error("Try-on failed: {message}")]
    TryOn {
        /// Backend status or reason
        message: String,
    },

    /// An image string was not a usable data URL.
    #[error("Invalid image: {message}")]
    InvalidImage {
        /// Why the image was rejected
        message: String,
    },

    /// Image decode or encode failure.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Catalog document could not be produced.
    #[error("Export error: {message}")]
    Export {
        /// Underlying cause
        message: String,
    },

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Underlying cause
        message: String,
    },

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure while building a request.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
