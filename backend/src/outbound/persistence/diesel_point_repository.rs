//! PostgreSQL-backed `PointRepository` implementation using Diesel ORM.
//!
//! The create path writes the point row and its item associations inside a
//! single transaction; any insert failure rolls the whole submission back so
//! no partial state is ever observable.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{PointRepository, PointRepositoryError};
use crate::domain::{Item, NewPoint, POINT_IMAGE_PLACEHOLDER, Point};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ItemRow, NewPointItemRow, NewPointRow, PointRow};
use super::pool::{DbPool, PoolError};
use super::schema::{items, point_items, points};

/// Diesel-backed implementation of the point repository port.
#[derive(Clone)]
pub struct DieselPointRepository {
    pool: DbPool,
}

impl DieselPointRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> PointRepositoryError {
    map_pool_error(error, PointRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> PointRepositoryError {
    map_diesel_error(
        error,
        PointRepositoryError::query,
        PointRepositoryError::connection,
    )
}

fn row_to_point(row: PointRow) -> Point {
    Point {
        id: row.id,
        name: row.name,
        email: row.email,
        latitude: row.latitude,
        longitude: row.longitude,
        city: row.city,
        uf: row.uf,
        image: row.image,
    }
}

fn row_to_item(row: ItemRow) -> Item {
    Item {
        id: row.id,
        title: row.title,
        image: row.image,
    }
}

#[async_trait]
impl PointRepository for DieselPointRepository {
    async fn create(&self, draft: NewPoint) -> Result<Point, PointRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewPointRow {
            image: POINT_IMAGE_PLACEHOLDER,
            name: &draft.name,
            email: &draft.email,
            latitude: draft.latitude,
            longitude: draft.longitude,
            city: &draft.city,
            uf: &draft.uf,
        };
        let item_ids = draft.items.clone();

        let point_id = conn
            .transaction(|conn| {
                async move {
                    // The point insert must complete first: the association
                    // rows reference its generated identifier.
                    let point_id: i32 = diesel::insert_into(points::table)
                        .values(&new_row)
                        .returning(points::id)
                        .get_result(conn)
                        .await?;

                    let association_rows: Vec<NewPointItemRow> = item_ids
                        .iter()
                        .map(|&item_id| NewPointItemRow { point_id, item_id })
                        .collect();

                    if !association_rows.is_empty() {
                        diesel::insert_into(point_items::table)
                            .values(&association_rows)
                            .execute(conn)
                            .await?;
                    }

                    Ok::<i32, diesel::result::Error>(point_id)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel)?;

        drop(conn);
        Ok(draft.into_point(point_id))
    }

    async fn find_with_items(
        &self,
        id: i32,
    ) -> Result<Option<(Point, Vec<Item>)>, PointRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        // Read both tables in one transaction so the point and its items
        // observe the same snapshot.
        let result = conn
            .transaction(|conn| {
                async move {
                    let found = points::table
                        .filter(points::id.eq(id))
                        .select(PointRow::as_select())
                        .first::<PointRow>(conn)
                        .await
                        .optional()?;

                    let Some(point_row) = found else {
                        return Ok::<Option<(PointRow, Vec<ItemRow>)>, diesel::result::Error>(None);
                    };

                    // The join is keyed on the association table's point_id.
                    let item_rows: Vec<ItemRow> = point_items::table
                        .inner_join(items::table)
                        .filter(point_items::point_id.eq(id))
                        .select(ItemRow::as_select())
                        .load(conn)
                        .await?;

                    Ok(Some((point_row, item_rows)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel)?;

        Ok(result.map(|(point, item_rows)| {
            (
                row_to_point(point),
                item_rows.into_iter().map(row_to_item).collect(),
            )
        }))
    }
}
