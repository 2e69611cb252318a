//! Entity module - Contains all SeaORM entity definitions for the local store.
//! These entities represent the database tables; the data access layer in
//! [`crate::core`] maps their models to the shapes in [`crate::models`].

pub mod attributes;
pub mod item;
pub mod outfit;
pub mod settings;

pub use attributes::{Category, Occasion, Season, UnknownAttribute};
pub use item::{Column as ItemColumn, Entity as Item, Model as ItemModel};
pub use outfit::{Column as OutfitColumn, Entity as Outfit, ItemIds, Model as OutfitModel};
pub use settings::{
    Column as SettingsColumn, Entity as Settings, Model as SettingsModel, SETTINGS_ID,
};
