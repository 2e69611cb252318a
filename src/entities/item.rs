//! Item entity - A single photographed clothing article.
//!
//! The photo is kept inline as a data URL so the row is self-contained.
//! Category, sub-category, season, occasion and the favorite flag are indexed
//! because the wardrobe screens filter on them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::attributes::{Category, Occasion, Season};

/// Item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    /// Unique identifier, assigned by the store on insert
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Garment category
    #[sea_orm(indexed)]
    pub category: Category,
    /// Optional finer grouping (e.g. "t-shirt", "sneakers")
    #[sea_orm(indexed)]
    pub sub_category: Option<String>,
    /// Free-text color description
    pub color: String,
    /// Season the item suits
    #[sea_orm(indexed)]
    pub season: Season,
    /// Occasion the item suits
    #[sea_orm(indexed)]
    pub occasion: Occasion,
    /// Photo as a `data:<mime>;base64,...` string
    #[sea_orm(column_type = "Text")]
    pub image: String,
    /// Optional free-text notes
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    /// Whether the user starred this item
    #[sea_orm(indexed)]
    pub is_favorite: bool,
    /// When the item was added
    pub created_at: DateTimeUtc,
}

/// Items are referenced by outfits only through a stored id list, so there
/// are no foreign-key relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
