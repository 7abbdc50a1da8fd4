//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use diesel::prelude::*;

use super::schema::{items, point_items, points};

/// Row struct for reading from the items table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ItemRow {
    pub id: i32,
    pub title: String,
    pub image: String,
}

/// Row struct for reading from the points table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = points)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PointRow {
    pub id: i32,
    pub image: String,
    pub name: String,
    pub email: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
}

/// Insertable struct for creating new point records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = points)]
pub(crate) struct NewPointRow<'a> {
    pub image: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub city: &'a str,
    pub uf: &'a str,
}

/// Insertable struct for the point/item association rows.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = point_items)]
pub(crate) struct NewPointItemRow {
    pub point_id: i32,
    pub item_id: i32,
}
