//! Settings data access - The singleton row with id [`SETTINGS_ID`].
//!
//! `get_settings` returning `None` is how the app detects first launch.
//! `save_settings` replaces the whole row; `complete_onboarding` only touches
//! the profile fields and the onboarding flag.

use crate::{
    entities::{SETTINGS_ID, Settings as SettingsEntity, settings},
    errors::Result,
    models::{Settings, UserProfile},
};
use sea_orm::{Set, prelude::*};
use tracing::{info, instrument};

/// Loads the settings row, or None on first run.
pub async fn get_settings(db: &DatabaseConnection) -> Result<Option<Settings>> {
    let model = SettingsEntity::find_by_id(SETTINGS_ID).one(db).await?;
    Ok(model.map(Settings::from))
}

/// Replaces the settings row with `new_settings`, creating it if absent.
#[instrument(skip_all, fields(provider = new_settings.selected_provider.as_str()))]
pub async fn save_settings(db: &DatabaseConnection, new_settings: Settings) -> Result<()> {
    let exists = SettingsEntity::find_by_id(SETTINGS_ID).one(db).await?.is_some();
    let active = to_active_model(new_settings.into_model());

    if exists {
        active.update(db).await?;
    } else {
        active.insert(db).await?;
    }

    info!("Settings saved");
    Ok(())
}

// Every column `Set`, so an update rewrites the full row.
fn to_active_model(model: settings::Model) -> settings::ActiveModel {
    settings::ActiveModel {
        id: Set(model.id),
        openai_key: Set(model.openai_key),
        gemini_key: Set(model.gemini_key),
        anthropic_key: Set(model.anthropic_key),
        openrouter_key: Set(model.openrouter_key),
        openrouter_model: Set(model.openrouter_model),
        try_on_key: Set(model.try_on_key),
        use_online_try_on: Set(model.use_online_try_on),
        selected_provider: Set(model.selected_provider),
        onboarding_complete: Set(model.onboarding_complete),
        user_age: Set(model.user_age),
        user_gender: Set(model.user_gender),
        user_style: Set(model.user_style),
    }
}

/// Returns the stored settings, writing the defaults first if this is the
/// first launch.
pub async fn ensure_default_settings(db: &DatabaseConnection) -> Result<Settings> {
    if let Some(existing) = get_settings(db).await? {
        return Ok(existing);
    }

    let defaults = Settings::default();
    save_settings(db, defaults.clone()).await?;
    info!("First launch: default settings created");
    Ok(defaults)
}

/// Records the onboarding answers and marks onboarding as complete.
///
/// Only the profile fields and the flag change; keys and provider choice are
/// preserved. Defaults are created first if the row is missing.
#[instrument(skip_all)]
pub async fn complete_onboarding(
    db: &DatabaseConnection,
    profile: UserProfile,
) -> Result<Settings> {
    ensure_default_settings(db).await?;

    let mut active = settings::ActiveModel {
        id: Set(SETTINGS_ID),
        ..Default::default()
    };
    active.onboarding_complete = Set(true);
    active.user_age = Set(profile.age);
    active.user_gender = Set(profile.gender);
    active.user_style = Set(profile.style);

    let updated = active.update(db).await?;
    info!("Onboarding complete");
    Ok(updated.into())
}
