//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. Migrations
//! themselves live with the deployment tooling; `diesel print-schema` can
//! regenerate this file from a live database.

diesel::table! {
    /// Catalog of collectible item categories, seeded out of band.
    items (id) {
        /// Primary key: generated integer identifier.
        id -> Int4,
        /// Display title.
        title -> Varchar,
        /// Stored image filename.
        image -> Varchar,
    }
}

diesel::table! {
    /// Registered collection points.
    points (id) {
        /// Primary key: generated integer identifier.
        id -> Int4,
        /// Stored image reference.
        image -> Varchar,
        /// Contact name of the registering entity.
        name -> Varchar,
        /// Contact email address.
        email -> Varchar,
        /// Latitude of the chosen map position.
        latitude -> Float8,
        /// Longitude of the chosen map position.
        longitude -> Float8,
        /// Subregion (city) name.
        city -> Varchar,
        /// Region code.
        uf -> Varchar,
    }
}

diesel::table! {
    /// Association between points and the item categories they accept.
    point_items (point_id, item_id) {
        /// Point side of the association.
        point_id -> Int4,
        /// Item side of the association.
        item_id -> Int4,
    }
}

diesel::joinable!(point_items -> points (point_id));
diesel::joinable!(point_items -> items (item_id));

diesel::allow_tables_to_appear_in_same_query!(items, points, point_items);
