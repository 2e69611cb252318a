//! Outfit data access - CRUD over the `outfits` table.
//!
//! Outfits store item ids, not items. Reads resolve those ids against the
//! current `items` table and drop any that no longer exist, so an outfit never
//! shows an item that has been deleted. Nothing is repaired on disk.

use crate::{
    entities::{Item as ItemEntity, ItemIds, Outfit as OutfitEntity, item, outfit},
    errors::{Error, Result},
    models::{Item, NewOutfit, Outfit},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

/// Retrieves every outfit with its items resolved, oldest first.
pub async fn list_outfits(db: &DatabaseConnection) -> Result<Vec<Outfit>> {
    let outfits = OutfitEntity::find()
        .order_by_asc(outfit::Column::Id)
        .all(db)
        .await?;

    let wardrobe = crate::core::item::list_items(db).await?;

    Ok(outfits
        .into_iter()
        .map(|model| Outfit::resolve(model, &wardrobe))
        .collect())
}

/// Finds an outfit by id with its items resolved; None if it does not exist.
pub async fn get_outfit(db: &DatabaseConnection, outfit_id: i64) -> Result<Option<Outfit>> {
    let Some(model) = OutfitEntity::find_by_id(outfit_id).one(db).await? else {
        return Ok(None);
    };

    let items = find_items(db, &model.item_ids.0).await?;
    Ok(Some(Outfit::resolve(model, &items)))
}

async fn find_items(db: &DatabaseConnection, ids: &[i64]) -> Result<Vec<Item>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let items = ItemEntity::find()
        .filter(item::Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await?;
    Ok(items.into_iter().map(Item::from).collect())
}

/// Saves a new outfit and returns its id.
///
/// The name must not be blank and every referenced item must exist at the
/// time of saving. Later item deletions are not checked.
#[instrument(skip(db, new_outfit), fields(name = %new_outfit.name))]
pub async fn create_outfit(db: &DatabaseConnection, new_outfit: NewOutfit) -> Result<i64> {
    if new_outfit.name.trim().is_empty() {
        return Err(Error::validation("Outfit name cannot be empty"));
    }

    let wanted: BTreeSet<i64> = new_outfit.item_ids.iter().copied().collect();
    let found = find_items(db, &new_outfit.item_ids).await?;
    if found.len() != wanted.len() {
        let missing: Vec<i64> = wanted
            .iter()
            .filter(|id| !found.iter().any(|item| item.id == **id))
            .copied()
            .collect();
        return Err(Error::validation(format!(
            "Outfit references items that do not exist: {missing:?}"
        )));
    }

    let model = outfit::ActiveModel {
        name: Set(new_outfit.name),
        season: Set(new_outfit.season),
        occasion: Set(new_outfit.occasion),
        item_ids: Set(ItemIds(new_outfit.item_ids)),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let inserted = model.insert(db).await?;
    info!(outfit_id = inserted.id, "Outfit saved");
    Ok(inserted.id)
}

/// Removes an outfit. The referenced items are not affected.
#[instrument(skip(db))]
pub async fn delete_outfit(db: &DatabaseConnection, outfit_id: i64) -> Result<()> {
    let result = OutfitEntity::delete_by_id(outfit_id).exec(db).await?;
    debug!(rows = result.rows_affected, "Outfit delete finished");
    Ok(())
}
