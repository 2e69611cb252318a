//! Outfit entity - A named grouping of item references.
//!
//! Item ids are stored as a JSON array rather than through a join table:
//! the outfit does not own the items and deleting an item leaves the id in
//! place. Readers resolve the list against the current items table.

use sea_orm::{FromJsonQueryResult, entity::prelude::*};
use serde::{Deserialize, Serialize};

use super::attributes::Season;

/// Ordered list of referenced item ids
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ItemIds(pub Vec<i64>);

/// Outfit database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "outfits")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g. "Date Night Outfit")
    #[sea_orm(indexed)]
    pub name: String,
    /// Season the outfit is meant for
    #[sea_orm(indexed)]
    pub season: Season,
    /// Occasion, free text since recommendations accept any occasion
    #[sea_orm(indexed)]
    pub occasion: String,
    /// Referenced item ids, not checked after creation
    #[sea_orm(column_type = "Json")]
    pub item_ids: ItemIds,
    /// When the outfit was saved
    pub created_at: DateTimeUtc,
}

/// No foreign-key relations; see module docs.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
