//! Local store configuration and schema management.
//!
//! This module opens the embedded `SQLite` database through `SeaORM` and creates
//! the `items`, `outfits` and `settings` tables plus their secondary indexes
//! from the entity definitions using `Schema::create_table_from_entity` and
//! `Schema::create_index_from_entity`. Every statement is issued with
//! `IF NOT EXISTS`, so initialization can run on every launch.

use crate::entities::{Item, Outfit, Settings};
use crate::errors::{Error, Result};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use std::path::Path;
use tracing::{debug, error, info, instrument};

/// Store location used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/hangar.sqlite?mode=rwc";

/// Gets the database URL from the environment or returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
pub async fn create_connection() -> Result<DatabaseConnection> {
    connect(&get_database_url()).await
}

async fn connect(database_url: &str) -> Result<DatabaseConnection> {
    ensure_parent_dir(database_url)?;
    Database::connect(database_url).await.map_err(Into::into)
}

// `mode=rwc` creates the file but not its directory.
fn ensure_parent_dir(database_url: &str) -> Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let file = rest.split('?').next().unwrap_or_default();
    if file.is_empty() || file.contains(":memory:") {
        return Ok(());
    }
    match Path::new(file).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)?,
        _ => {}
    }
    Ok(())
}

/// Creates the three tables and their secondary indexes if they are missing.
///
/// Items are indexed on category, sub-category, season, occasion and the
/// favorite flag; outfits on name, season and occasion.
#[instrument(skip(db))]
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    create_table_with_indexes(db, &schema, Item).await?;
    create_table_with_indexes(db, &schema, Outfit).await?;
    create_table_with_indexes(db, &schema, Settings).await?;

    debug!("Local store tables and indexes ensured");
    Ok(())
}

async fn create_table_with_indexes<E>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();

    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(builder.build(&table)).await?;

    for mut index in schema.create_index_from_entity(entity) {
        index.if_not_exists();
        db.execute(builder.build(&index)).await?;
    }

    Ok(())
}

/// Opens the store at `database_url` and ensures the schema exists.
///
/// Any failure here leaves the application without storage, so it is reported
/// as [`Error::StoreInit`] for the caller to treat as fatal.
#[instrument]
pub async fn init_store(database_url: &str) -> Result<DatabaseConnection> {
    let db = connect(database_url)
        .await
        .map_err(|e| Error::StoreInit {
            message: e.to_string(),
        })
        .inspect_err(|e| error!("{e}"))?;

    create_tables(&db)
        .await
        .map_err(|e| Error::StoreInit {
            message: e.to_string(),
        })
        .inspect_err(|e| error!("{e}"))?;

    info!("Local store ready");
    Ok(db)
}
