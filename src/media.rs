//! Image helpers: data URL parsing and encoding.
//!
//! Photos travel through the app as `data:<mime>;base64,<payload>` strings,
//! the same form the store keeps them in.

use crate::errors::{Error, Result};
use base64::{Engine, engine::general_purpose};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// Mime type assumed when an image string carries no header
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// A decoded data URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// e.g. `image/png`
    pub mime_type: String,
    /// Decoded payload
    pub data: Vec<u8>,
}

impl DataUrl {
    /// Parses a base64 data URL.
    ///
    /// # Errors
    /// [`Error::InvalidImage`] when the header is missing, not base64, or the
    /// payload does not decode.
    pub fn parse(value: &str) -> Result<Self> {
        let rest = value.strip_prefix("data:").ok_or_else(|| invalid("missing data: prefix"))?;
        let (header, payload) = rest.split_once(',').ok_or_else(|| invalid("missing payload"))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| invalid("payload is not base64"))?;

        let data = general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| invalid(&e.to_string()))?;

        Ok(Self {
            mime_type: if mime_type.is_empty() {
                DEFAULT_IMAGE_MIME.to_string()
            } else {
                mime_type.to_string()
            },
            data,
        })
    }

    /// Builds a data URL from raw bytes.
    #[must_use]
    pub fn encode(mime_type: &str, data: &[u8]) -> String {
        format!(
            "data:{mime_type};base64,{}",
            general_purpose::STANDARD.encode(data)
        )
    }

    /// Decodes the payload as an image.
    pub fn to_image(&self) -> Result<DynamicImage> {
        Ok(image::load_from_memory(&self.data)?)
    }
}

fn invalid(message: &str) -> Error {
    Error::InvalidImage {
        message: message.to_string(),
    }
}

/// Wraps captured image bytes as a data URL, sniffing the format.
pub fn bytes_to_data_url(bytes: &[u8]) -> Result<String> {
    let format = image::guess_format(bytes)?;
    Ok(DataUrl::encode(format.to_mime_type(), bytes))
}

/// Decodes an image held in a data URL.
pub fn decode_data_url(value: &str) -> Result<DynamicImage> {
    DataUrl::parse(value)?.to_image()
}

/// Encodes an image as a PNG data URL.
pub fn png_data_url(image: &DynamicImage) -> Result<String> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(DataUrl::encode("image/png", buffer.get_ref()))
}
