//! Prompt text for the styling, classification and outfit-matching requests.

use crate::errors::Result;
use crate::media::DEFAULT_IMAGE_MIME;
use crate::models::Item;
use serde::Serialize;

/// Instruction sent with a single clothing photo
pub const CLASSIFY_PHOTO_PROMPT: &str = "Analyze this clothing item. Return ONLY valid JSON with keys: category (one of: tops, bottoms, dresses, shoes, accessories), color, season (one of: summer, winter, spring, autumn), occasion (one of: casual, formal, party, sports), notes (short description).";

const RECOMMEND_REQUEST: &str = "Please recommend an outfit from the above wardrobe for the specified occasion and preferences. Return a VALID JSON with key 'notes' (string) and 'items' (array of NUMBERS corresponding to the IDs of the selected items).";

/// An inline image split into the parts providers ask for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    /// e.g. `image/jpeg`
    pub mime_type: String,
    /// Base64 payload without the data URL header
    pub base64_data: String,
}

impl ImageAttachment {
    /// Accepts a data URL or a bare base64 payload (assumed JPEG).
    #[must_use]
    pub fn from_image_string(image: &str) -> Self {
        let parts = image
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(','));

        if let Some((header, payload)) = parts {
            let mime = header.split(';').next().unwrap_or_default();
            return Self {
                mime_type: if mime.is_empty() {
                    DEFAULT_IMAGE_MIME.to_string()
                } else {
                    mime.to_string()
                },
                base64_data: payload.to_string(),
            };
        }

        Self {
            mime_type: DEFAULT_IMAGE_MIME.to_string(),
            base64_data: image.to_string(),
        }
    }

    /// Reassembled data URL, for providers that take one
    #[must_use]
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_data)
    }
}

/// Text plus an optional image, the provider-neutral request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderPrompt {
    /// Prompt text
    pub text: String,
    /// Optional photo
    pub image: Option<ImageAttachment>,
}

impl ProviderPrompt {
    /// Text-only prompt
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
        }
    }

    /// Prompt with an attached photo
    #[must_use]
    pub fn with_image(text: impl Into<String>, image: &str) -> Self {
        Self {
            text: text.into(),
            image: Some(ImageAttachment::from_image_string(image)),
        }
    }
}

#[derive(Serialize)]
struct StylingRequest<'a> {
    task: &'a str,
    occasion: &'a str,
    preferences: &'a str,
    wardrobe: String,
    request: &'a str,
}

fn wardrobe_line(item: &Item) -> String {
    let line = format!(
        "- (ID: {}) {} {} {} ({}) {}",
        item.id,
        item.color,
        item.season.as_str(),
        item.category.as_str(),
        item.occasion.as_str(),
        if item.is_favorite { "[Favorite]" } else { "" }
    );
    line.trim_end().to_string()
}

/// Pretty-printed JSON prompt asking for an outfit for `occasion`.
pub fn recommendation_prompt(items: &[Item], occasion: &str, preferences: &str) -> Result<String> {
    let wardrobe = items.iter().map(wardrobe_line).collect::<Vec<_>>().join("\n");
    let preferences = preferences.trim();

    let request = StylingRequest {
        task: "Style an outfit",
        occasion,
        preferences: if preferences.is_empty() { "None" } else { preferences },
        wardrobe,
        request: RECOMMEND_REQUEST,
    };

    Ok(serde_json::to_string_pretty(&request)?)
}

#[derive(Serialize)]
struct CatalogEntry {
    id: i64,
    desc: String,
}

/// Prompt asking which wardrobe items best recreate the pictured outfit.
pub fn match_outfit_prompt(items: &[Item]) -> Result<String> {
    let catalog: Vec<CatalogEntry> = items
        .iter()
        .map(|item| CatalogEntry {
            id: item.id,
            desc: format!(
                "{} {} ({}, {}) - {}",
                item.color,
                item.category.as_str(),
                item.season.as_str(),
                item.occasion.as_str(),
                item.notes.as_deref().unwrap_or_default()
            ),
        })
        .collect();

    Ok(format!(
        "I have an image of an outfit I want to recreate.\n\
         Below is my wardrobe catalog:\n\
         {}\n\n\
         Analyze the image. Find the items from my wardrobe that BEST match the items in the image to recreate this look.\n\
         Return ONLY valid JSON with a key \"matched_item_ids\" containing an array of IDs (numbers) of the matching items.",
        serde_json::to_string(&catalog)?
    ))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{Category, Occasion, Season};
    use crate::test_utils::test_item;
    use serde_json::Value;

    #[test]
    fn test_recommendation_prompt_lists_wardrobe() -> Result<()> {
        let mut fav = test_item(3, Category::Shoes);
        fav.is_favorite = true;
        fav.color = "white".to_string();
        fav.season = Season::All;
        fav.occasion = Occasion::Sports;
        let plain = test_item(5, Category::Tops);

        let prompt = recommendation_prompt(&[fav, plain], "Beach Party", "")?;
        let parsed: Value = serde_json::from_str(&prompt).unwrap();

        assert_eq!(parsed["task"], "Style an outfit");
        assert_eq!(parsed["occasion"], "Beach Party");
        assert_eq!(parsed["preferences"], "None");
        let wardrobe = parsed["wardrobe"].as_str().unwrap();
        assert_eq!(
            wardrobe,
            "- (ID: 3) white all shoes (sports) [Favorite]\n- (ID: 5) blue summer tops (casual)"
        );
        assert!(parsed["request"].as_str().unwrap().contains("'items'"));

        // Field order follows the struct, not alphabetical
        assert!(prompt.find("\"task\"").unwrap() < prompt.find("\"occasion\"").unwrap());
        Ok(())
    }

    #[test]
    fn test_match_outfit_prompt_embeds_catalog() -> Result<()> {
        let mut item = test_item(9, Category::Bottoms);
        item.notes = Some("slim fit".to_string());
        let prompt = match_outfit_prompt(&[item])?;
        assert!(prompt.contains(r#"[{"id":9,"desc":"blue bottoms (summer, casual) - slim fit"}]"#));
        assert!(prompt.contains("matched_item_ids"));
        Ok(())
    }

    #[test]
    fn test_attachment_from_data_url_and_bare_payload() {
        let from_url = ImageAttachment::from_image_string("data:image/png;base64,QUJD");
        assert_eq!(from_url.mime_type, "image/png");
        assert_eq!(from_url.base64_data, "QUJD");
        assert_eq!(from_url.data_url(), "data:image/png;base64,QUJD");

        let bare = ImageAttachment::from_image_string("QUJD");
        assert_eq!(bare.mime_type, "image/jpeg");
        assert_eq!(bare.base64_data, "QUJD");
    }
}
