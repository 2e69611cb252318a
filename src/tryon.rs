//! Virtual try-on: an online image-generation backend, or a naive local
//! composite of the garment over the person photo.
//!
//! The result always says how it was produced so a composite is never passed
//! off as a generated image.

use crate::config::AppConfig;
use crate::errors::{Error, Result};
use crate::media::{decode_data_url, png_data_url};
use crate::models::Settings;
use crate::providers::{HttpRequest, Transport, extract_json};
use async_trait::async_trait;
use image::{DynamicImage, RgbaImage, imageops, imageops::FilterType};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Pixels the garment is pushed down from the vertical centre
pub const GARMENT_VERTICAL_OFFSET: i64 = 100;

/// How a try-on image came to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryOnSource {
    /// Produced by the online backend
    Generated,
    /// Garment pasted over the photo locally
    LocalComposite,
}

/// A try-on result as a PNG (or backend-provided) data URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryOnImage {
    /// Data URL of the resulting image
    pub image: String,
    /// Where it came from
    pub source: TryOnSource,
}

/// Person photo and garment photo, both data URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryOnRequest {
    /// Photo of the person
    pub base_photo: String,
    /// Photo of the garment
    pub garment: String,
}

/// Online image-generation backend
#[async_trait]
pub trait TryOnBackend: Send + Sync {
    /// Returns the generated image as a data URL.
    async fn generate(&self, api_key: &str, request: &TryOnRequest) -> Result<String>;
}

/// Backend reached with a JSON `POST` through a [`Transport`].
///
/// Sends `{ "person_image", "garment_image" }` with bearer auth and expects an
/// `image` field holding a data URL or bare base64 PNG.
pub struct HttpTryOnBackend {
    endpoint: String,
    transport: Arc<dyn Transport>,
}

impl HttpTryOnBackend {
    /// Backend at `endpoint`
    #[must_use]
    pub fn new(endpoint: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
        }
    }
}

#[async_trait]
impl TryOnBackend for HttpTryOnBackend {
    async fn generate(&self, api_key: &str, request: &TryOnRequest) -> Result<String> {
        let http = HttpRequest::post(
            self.endpoint.clone(),
            json!({
                "person_image": request.base_photo,
                "garment_image": request.garment,
            }),
        )
        .header("Authorization", format!("Bearer {api_key}"));

        let response = self.transport.send(http).await?;
        let body = extract_json(&response.body);

        if !response.is_success() {
            let message = body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map_or_else(|| format!("status {}", response.status), str::to_string);
            return Err(Error::TryOn { message });
        }

        match body.get("image").and_then(Value::as_str) {
            Some(image) if image.starts_with("data:") => Ok(image.to_string()),
            Some(image) if !image.is_empty() => Ok(format!("data:image/png;base64,{image}")),
            _ => Err(Error::TryOn {
                message: "response contained no image".to_string(),
            }),
        }
    }
}

/// Pastes `garment`, scaled to half size, over `base`.
///
/// Horizontally centred, vertically centred then pushed down by
/// [`GARMENT_VERTICAL_OFFSET`]. Alpha is respected and anything past the
/// canvas edge is clipped.
#[must_use]
pub fn composite(base: &DynamicImage, garment: &DynamicImage) -> RgbaImage {
    let mut canvas = base.to_rgba8();

    let width = (garment.width() / 2).max(1);
    let height = (garment.height() / 2).max(1);
    let scaled = garment.resize_exact(width, height, FilterType::Triangle).to_rgba8();

    let x = (i64::from(canvas.width()) - i64::from(width)) / 2;
    let y = (i64::from(canvas.height()) - i64::from(height)) / 2 + GARMENT_VERTICAL_OFFSET;
    imageops::overlay(&mut canvas, &scaled, x, y);

    canvas
}

/// Decodes both photos and builds the local composite.
pub fn compose_locally(request: &TryOnRequest) -> Result<TryOnImage> {
    let base = decode_data_url(&request.base_photo)?;
    let garment = decode_data_url(&request.garment)?;
    let canvas = composite(&base, &garment);

    Ok(TryOnImage {
        image: png_data_url(&DynamicImage::ImageRgba8(canvas))?,
        source: TryOnSource::LocalComposite,
    })
}

/// Chooses between the online backend and the local composite.
#[derive(Default)]
pub struct TryOnService {
    backend: Option<Arc<dyn TryOnBackend>>,
}

impl TryOnService {
    /// Service with an explicit backend (or none)
    #[must_use]
    pub fn new(backend: Option<Arc<dyn TryOnBackend>>) -> Self {
        Self { backend }
    }

    /// Uses the HTTP backend when `try_on.endpoint` is configured.
    #[must_use]
    pub fn from_config(config: &AppConfig, transport: Arc<dyn Transport>) -> Self {
        let backend = config
            .try_on
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(|endpoint| {
                Arc::new(HttpTryOnBackend::new(endpoint, transport)) as Arc<dyn TryOnBackend>
            });
        Self::new(backend)
    }

    /// Produces a try-on preview.
    ///
    /// # Errors
    /// - [`Error::TryOnDisabled`] when online try-on is switched off
    /// - [`Error::MissingApiKey`] when no try-on key is stored
    /// - backend or image decode failures
    #[instrument(skip_all, fields(backend = self.backend.is_some()))]
    pub async fn generate(
        &self,
        settings: &Settings,
        request: &TryOnRequest,
    ) -> Result<TryOnImage> {
        if !settings.use_online_try_on {
            return Err(Error::TryOnDisabled);
        }

        let api_key = settings
            .try_on_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::MissingApiKey {
                provider: "virtual try-on".to_string(),
            })?;

        if let Some(backend) = &self.backend {
            let image = backend.generate(api_key, request).await?;
            info!("Try-on image generated");
            return Ok(TryOnImage {
                image,
                source: TryOnSource::Generated,
            });
        }

        warn!("No try-on backend configured, compositing locally");
        compose_locally(request)
    }
}
