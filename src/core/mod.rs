//! Data access layer - framework-agnostic CRUD over the local store.
//!
//! The presentation layer never touches the entities directly; it calls these
//! functions and receives the shapes from [`crate::models`].

/// Item operations
pub mod item;
/// Outfit operations with reference resolution
pub mod outfit;
/// Singleton settings operations
pub mod settings;

pub use item::{create_item, delete_item, get_item, list_items, toggle_favorite};
pub use outfit::{create_outfit, delete_outfit, get_outfit, list_outfits};
pub use settings::{complete_onboarding, ensure_default_settings, get_settings, save_settings};
