//! Settings entity - The singleton application configuration row.
//!
//! Exactly one row exists once the app has launched, always with id
//! [`SETTINGS_ID`]. A missing row means first run.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::providers::Provider;

/// Fixed primary key of the settings row
pub const SETTINGS_ID: i32 = 1;

/// Settings database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    /// Always [`SETTINGS_ID`]
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    /// OpenAI API key
    pub openai_key: Option<String>,
    /// Google Gemini API key
    pub gemini_key: Option<String>,
    /// Anthropic API key
    pub anthropic_key: Option<String>,
    /// OpenRouter API key
    pub openrouter_key: Option<String>,
    /// Model string for OpenRouter, which accepts any model id
    pub openrouter_model: Option<String>,
    /// Key for the image-generation backend used by online try-on
    pub try_on_key: Option<String>,
    /// Whether virtual try-on may use the network
    pub use_online_try_on: bool,
    /// Provider used for recommendations and photo analysis
    pub selected_provider: Provider,
    /// Whether the onboarding flow has been finished
    pub onboarding_complete: bool,
    /// Free-text profile: age
    pub user_age: Option<String>,
    /// Free-text profile: gender
    pub user_gender: Option<String>,
    /// Free-text profile: style preference
    pub user_style: Option<String>,
}

/// Settings have no relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
