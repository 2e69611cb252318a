//! Item data access - CRUD over the `items` table.
//!
//! Every function is a single async round trip (or two, for read-modify-write)
//! and returns the UI-facing [`Item`] shape. Missing ids are not errors: reads
//! return `None` and deletes/toggles do nothing.

use crate::{
    entities::{Category, Item as ItemEntity, item},
    errors::{Error, Result},
    models::{Item, NewItem},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument};

/// Retrieves every item, oldest first.
pub async fn list_items(db: &DatabaseConnection) -> Result<Vec<Item>> {
    let items = ItemEntity::find()
        .order_by_asc(item::Column::Id)
        .all(db)
        .await?;
    Ok(items.into_iter().map(Item::from).collect())
}

/// Retrieves the starred items, oldest first.
pub async fn list_favorite_items(db: &DatabaseConnection) -> Result<Vec<Item>> {
    let items = ItemEntity::find()
        .filter(item::Column::IsFavorite.eq(true))
        .order_by_asc(item::Column::Id)
        .all(db)
        .await?;
    Ok(items.into_iter().map(Item::from).collect())
}

/// Retrieves the items of one category, oldest first.
pub async fn list_items_by_category(
    db: &DatabaseConnection,
    category: Category,
) -> Result<Vec<Item>> {
    let items = ItemEntity::find()
        .filter(item::Column::Category.eq(category))
        .order_by_asc(item::Column::Id)
        .all(db)
        .await?;
    Ok(items.into_iter().map(Item::from).collect())
}

/// Finds an item by id, returning None if it does not exist.
pub async fn get_item(db: &DatabaseConnection, item_id: i64) -> Result<Option<Item>> {
    let item = ItemEntity::find_by_id(item_id).one(db).await?;
    Ok(item.map(Item::from))
}

/// Adds an item to the wardrobe, assigning its id and creation timestamp.
///
/// The color must not be blank and the photo must be a data URL; nothing is
/// written when validation fails. Fields are stored exactly as given and the
/// returned record is what a later read yields.
#[instrument(skip(db, new_item), fields(category = new_item.category.as_str()))]
pub async fn create_item(db: &DatabaseConnection, new_item: NewItem) -> Result<Item> {
    if new_item.color.trim().is_empty() {
        return Err(Error::validation("Item color cannot be empty"));
    }

    if !new_item.image.starts_with("data:") {
        return Err(Error::validation("Item must have a photo"));
    }

    let model = item::ActiveModel {
        category: Set(new_item.category),
        sub_category: Set(new_item.sub_category),
        color: Set(new_item.color),
        season: Set(new_item.season),
        occasion: Set(new_item.occasion),
        image: Set(new_item.image),
        notes: Set(new_item.notes),
        is_favorite: Set(new_item.is_favorite),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let inserted = model.insert(db).await?;
    info!(item_id = inserted.id, "Item added to wardrobe");
    Ok(inserted.into())
}

/// Removes an item. Deleting an id that does not exist is a no-op.
///
/// Outfits referencing the item are left untouched; the reference simply
/// stops resolving.
#[instrument(skip(db))]
pub async fn delete_item(db: &DatabaseConnection, item_id: i64) -> Result<()> {
    let result = ItemEntity::delete_by_id(item_id).exec(db).await?;
    debug!(rows = result.rows_affected, "Item delete finished");
    Ok(())
}

/// Flips the favorite flag of an item. Does nothing if the item is missing.
#[instrument(skip(db))]
pub async fn toggle_favorite(db: &DatabaseConnection, item_id: i64) -> Result<()> {
    let Some(existing) = ItemEntity::find_by_id(item_id).one(db).await? else {
        debug!("Item not found, nothing to toggle");
        return Ok(());
    };

    let favorite = !existing.is_favorite;
    let mut active: item::ActiveModel = existing.into();
    active.is_favorite = Set(favorite);
    active.update(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{Occasion, Season};
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_item_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        // Blank color
        let mut input = test_new_item(Category::Tops);
        input.color = "   ".to_string();
        let result = create_item(&db, input).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { message: _ }));

        // Missing photo
        let mut input = test_new_item(Category::Tops);
        input.image = String::new();
        let result = create_item(&db, input).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_then_get_returns_input_plus_identity() -> Result<()> {
        let db = setup_test_db().await?;
        let input = NewItem {
            category: Category::Dresses,
            sub_category: Some("maxi".to_string()),
            color: "emerald".to_string(),
            season: Season::Summer,
            occasion: Occasion::Party,
            image: TEST_IMAGE.to_string(),
            notes: Some("linen".to_string()),
            is_favorite: false,
        };

        let created = create_item(&db, input.clone()).await?;
        let fetched = get_item(&db, created.id).await?.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.category, input.category);
        assert_eq!(fetched.sub_category, input.sub_category);
        assert_eq!(fetched.color, input.color);
        assert_eq!(fetched.season, input.season);
        assert_eq!(fetched.occasion, input.occasion);
        assert_eq!(fetched.image, input.image);
        assert_eq!(fetched.notes, input.notes);
        assert!(!fetched.is_favorite);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_test_item(&db, Category::Tops).await?;
        let second = create_test_item(&db, Category::Shoes).await?;
        assert_ne!(first.id, second.id);
        assert!(second.created_at >= first.created_at);
        Ok(())
    }

    #[tokio::test]
    async fn test_fields_are_stored_verbatim() -> Result<()> {
        let db = setup_test_db().await?;
        let mut input = test_new_item(Category::Bottoms);
        input.color = " navy ".to_string();
        input.notes = Some(String::new());
        input.sub_category = Some("tee ".to_string());

        let created = create_item(&db, input.clone()).await?;
        let fetched = get_item(&db, created.id).await?.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.color, " navy ");
        assert_eq!(fetched.notes, Some(String::new()));
        assert_eq!(fetched.sub_category, input.sub_category);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_item_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let item = create_test_item(&db, Category::Tops).await?;

        delete_item(&db, item.id).await?;
        assert!(get_item(&db, item.id).await?.is_none());

        // Second delete and a never-existing id are both fine
        delete_item(&db, item.id).await?;
        delete_item(&db, 999).await?;
        assert!(get_item(&db, 999).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_favorite_is_an_involution() -> Result<()> {
        let db = setup_test_db().await?;
        let item = create_test_item(&db, Category::Accessories).await?;
        assert!(!item.is_favorite);

        toggle_favorite(&db, item.id).await?;
        assert!(get_item(&db, item.id).await?.unwrap().is_favorite);

        toggle_favorite(&db, item.id).await?;
        assert!(!get_item(&db, item.id).await?.unwrap().is_favorite);

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_favorite_missing_item_is_noop() -> Result<()> {
        let db = setup_test_db().await?;
        toggle_favorite(&db, 42).await?;
        assert!(list_items(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_indexed_filters() -> Result<()> {
        let db = setup_test_db().await?;
        let top = create_test_item(&db, Category::Tops).await?;
        let shoes = create_test_item(&db, Category::Shoes).await?;
        let other_top = create_test_item(&db, Category::Tops).await?;
        toggle_favorite(&db, shoes.id).await?;

        let tops = list_items_by_category(&db, Category::Tops).await?;
        let top_ids: Vec<i64> = tops.iter().map(|i| i.id).collect();
        assert_eq!(top_ids, vec![top.id, other_top.id]);

        let favorites = list_favorite_items(&db).await?;
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, shoes.id);

        assert_eq!(list_items(&db).await?.len(), 3);
        Ok(())
    }
}
