//! PostgreSQL-backed `ItemRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::Item;
use crate::domain::ports::{ItemRepository, ItemRepositoryError};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::ItemRow;
use super::pool::{DbPool, PoolError};
use super::schema::items;

/// Diesel-backed implementation of the item repository port.
#[derive(Clone)]
pub struct DieselItemRepository {
    pool: DbPool,
}

impl DieselItemRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ItemRepositoryError {
    map_pool_error(error, ItemRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> ItemRepositoryError {
    map_diesel_error(
        error,
        ItemRepositoryError::query,
        ItemRepositoryError::connection,
    )
}

fn row_to_item(row: ItemRow) -> Item {
    Item {
        id: row.id,
        title: row.title,
        image: row.image,
    }
}

#[async_trait]
impl ItemRepository for DieselItemRepository {
    async fn list(&self) -> Result<Vec<Item>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<ItemRow> = items::table
            .select(ItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(row_to_item).collect())
    }
}
