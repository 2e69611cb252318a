//! UI-facing record shapes.
//!
//! The presentation layer only ever sees these types. Storage rows from
//! [`crate::entities`] are converted at the data access boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{
    Category, ItemModel, Occasion, OutfitModel, SETTINGS_ID, Season, SettingsModel,
};
use crate::providers::Provider;

/// A wardrobe garment as displayed by the app
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned identifier
    pub id: i64,
    /// Garment category
    pub category: Category,
    /// Optional finer grouping
    pub sub_category: Option<String>,
    /// Free-text color
    pub color: String,
    /// Season
    pub season: Season,
    /// Occasion
    pub occasion: Occasion,
    /// Photo as a data URL, usable directly as an image source
    pub image: String,
    /// Optional notes
    pub notes: Option<String>,
    /// Favorite flag
    pub is_favorite: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl From<ItemModel> for Item {
    fn from(model: ItemModel) -> Self {
        Self {
            id: model.id,
            category: model.category,
            sub_category: model.sub_category,
            color: model.color,
            season: model.season,
            occasion: model.occasion,
            image: model.image,
            notes: model.notes,
            is_favorite: model.is_favorite,
            created_at: model.created_at,
        }
    }
}

/// Fields supplied when adding an item; id and timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    /// Garment category
    pub category: Category,
    /// Optional finer grouping
    pub sub_category: Option<String>,
    /// Free-text color
    pub color: String,
    /// Season
    pub season: Season,
    /// Occasion
    pub occasion: Occasion,
    /// Photo as a data URL (required)
    pub image: String,
    /// Optional notes
    pub notes: Option<String>,
    /// Initial favorite flag
    pub is_favorite: bool,
}

/// An outfit with its item references resolved against the current wardrobe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outfit {
    /// Store-assigned identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Season
    pub season: Season,
    /// Occasion (free text)
    pub occasion: String,
    /// Items that still exist, in stored order
    pub items: Vec<Item>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Outfit {
    /// Builds the resolved view of a stored outfit. Ids with no matching
    /// item in `wardrobe` are skipped.
    #[must_use]
    pub fn resolve(model: OutfitModel, wardrobe: &[Item]) -> Self {
        let items = model
            .item_ids
            .0
            .iter()
            .filter_map(|id| wardrobe.iter().find(|item| item.id == *id))
            .cloned()
            .collect();

        Self {
            id: model.id,
            name: model.name,
            season: model.season,
            occasion: model.occasion,
            items,
            created_at: model.created_at,
        }
    }
}

/// Fields supplied when saving an outfit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOutfit {
    /// Display name
    pub name: String,
    /// Season
    pub season: Season,
    /// Occasion (free text)
    pub occasion: String,
    /// Referenced item ids
    pub item_ids: Vec<i64>,
}

/// Application settings as edited on the settings and onboarding screens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// OpenAI API key
    pub openai_key: Option<String>,
    /// Gemini API key
    pub gemini_key: Option<String>,
    /// Anthropic API key
    pub anthropic_key: Option<String>,
    /// OpenRouter API key
    pub openrouter_key: Option<String>,
    /// Model id sent to OpenRouter
    pub openrouter_model: Option<String>,
    /// Key for the try-on image backend
    pub try_on_key: Option<String>,
    /// Allow try-on to use the network
    pub use_online_try_on: bool,
    /// Provider for styling and analysis requests
    pub selected_provider: Provider,
    /// Onboarding finished
    pub onboarding_complete: bool,
    /// Profile: age
    pub user_age: Option<String>,
    /// Profile: gender
    pub user_gender: Option<String>,
    /// Profile: style preference
    pub user_style: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            openai_key: None,
            gemini_key: None,
            anthropic_key: None,
            openrouter_key: None,
            openrouter_model: None,
            try_on_key: None,
            use_online_try_on: false,
            selected_provider: Provider::Gemini,
            onboarding_complete: false,
            user_age: None,
            user_gender: None,
            user_style: None,
        }
    }
}

impl Settings {
    /// The API key stored for `provider`, ignoring blank strings.
    #[must_use]
    pub fn api_key_for(&self, provider: Provider) -> Option<&str> {
        let key = match provider {
            Provider::OpenAi => self.openai_key.as_deref(),
            Provider::Gemini => self.gemini_key.as_deref(),
            Provider::Anthropic => self.anthropic_key.as_deref(),
            Provider::OpenRouter => self.openrouter_key.as_deref(),
        };
        key.map(str::trim).filter(|k| !k.is_empty())
    }

    /// Key for the selected provider.
    #[must_use]
    pub fn selected_api_key(&self) -> Option<&str> {
        self.api_key_for(self.selected_provider)
    }

    pub(crate) fn into_model(self) -> SettingsModel {
        SettingsModel {
            id: SETTINGS_ID,
            openai_key: self.openai_key,
            gemini_key: self.gemini_key,
            anthropic_key: self.anthropic_key,
            openrouter_key: self.openrouter_key,
            openrouter_model: self.openrouter_model,
            try_on_key: self.try_on_key,
            use_online_try_on: self.use_online_try_on,
            selected_provider: self.selected_provider,
            onboarding_complete: self.onboarding_complete,
            user_age: self.user_age,
            user_gender: self.user_gender,
            user_style: self.user_style,
        }
    }
}

impl From<SettingsModel> for Settings {
    fn from(model: SettingsModel) -> Self {
        Self {
            openai_key: model.openai_key,
            gemini_key: model.gemini_key,
            anthropic_key: model.anthropic_key,
            openrouter_key: model.openrouter_key,
            openrouter_model: model.openrouter_model,
            try_on_key: model.try_on_key,
            use_online_try_on: model.use_online_try_on,
            selected_provider: model.selected_provider,
            onboarding_complete: model.onboarding_complete,
            user_age: model.user_age,
            user_gender: model.user_gender,
            user_style: model.user_style,
        }
    }
}

/// Profile answers collected by onboarding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Age
    pub age: Option<String>,
    /// Gender
    pub gender: Option<String>,
    /// Style preference
    pub style: Option<String>,
}
