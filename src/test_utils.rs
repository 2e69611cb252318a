//! Shared test utilities for Hangar.
//!
//! This module provides helpers for setting up test databases, building
//! wardrobe records with sensible defaults, and a canned HTTP transport for
//! exercising provider adapters without a network.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{item, outfit},
    entities::{Category, Occasion, Season},
    errors::Result,
    media::png_data_url,
    models::{Item, NewItem, NewOutfit},
    providers::{HttpRequest, HttpResponse, Transport},
};
use async_trait::async_trait;
use chrono::Utc;
use image::{DynamicImage, Rgba, RgbaImage};
use sea_orm::DatabaseConnection;
use std::sync::Mutex;

/// A valid 1x1 PNG data URL.
pub const TEST_IMAGE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Item input with sensible defaults.
///
/// # Defaults
/// * `color`: "blue"
/// * `season`: summer
/// * `occasion`: casual
/// * `image`: [`TEST_IMAGE`]
/// * no sub-category, no notes, not a favorite
#[must_use]
pub fn test_new_item(category: Category) -> NewItem {
    NewItem {
        category,
        sub_category: None,
        color: "blue".to_string(),
        season: Season::Summer,
        occasion: Occasion::Casual,
        image: TEST_IMAGE.to_string(),
        notes: None,
        is_favorite: false,
    }
}

/// An already-stored-looking item, for code that never touches the store.
#[must_use]
pub fn test_item(id: i64, category: Category) -> Item {
    let draft = test_new_item(category);
    Item {
        id,
        category: draft.category,
        sub_category: draft.sub_category,
        color: draft.color,
        season: draft.season,
        occasion: draft.occasion,
        image: draft.image,
        notes: draft.notes,
        is_favorite: draft.is_favorite,
        created_at: Utc::now(),
    }
}

/// Stores an item built by [`test_new_item`].
pub async fn create_test_item(db: &DatabaseConnection, category: Category) -> Result<Item> {
    item::create_item(db, test_new_item(category)).await
}

/// Outfit input for a summer, casual look.
#[must_use]
pub fn test_new_outfit(name: &str, item_ids: Vec<i64>) -> NewOutfit {
    NewOutfit {
        name: name.to_string(),
        season: Season::Summer,
        occasion: "casual".to_string(),
        item_ids,
    }
}

/// Stores an outfit built by [`test_new_outfit`], returning its id.
pub async fn create_test_outfit(
    db: &DatabaseConnection,
    name: &str,
    item_ids: Vec<i64>,
) -> Result<i64> {
    outfit::create_outfit(db, test_new_outfit(name, item_ids)).await
}

/// Solid-color RGBA image
#[must_use]
pub fn solid_image(width: u32, height: u32, color: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(color)))
}

/// Solid-color image as a PNG data URL
pub fn solid_png(width: u32, height: u32, color: [u8; 4]) -> String {
    png_data_url(&solid_image(width, height, color)).unwrap()
}

/// Transport that answers every request with the same response and keeps
/// what it was sent.
pub struct CannedTransport {
    response: HttpResponse,
    sent: Mutex<Vec<HttpRequest>>,
}

impl CannedTransport {
    /// Answers with `status` and `body`
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            response: HttpResponse {
                status,
                body: body.into(),
            },
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Answers 200 with `body` serialized
    pub fn ok(body: &serde_json::Value) -> Self {
        Self::new(200, body.to_string())
    }

    /// Every request sent so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for CannedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.sent.lock().unwrap().push(request);
        Ok(self.response.clone())
    }
}
