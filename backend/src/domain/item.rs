//! Catalog item entity.

/// A category of collectible material offered by the catalog.
///
/// Items are immutable reference data seeded out of band; this service only
/// reads them. `image` is the stored filename; the HTTP layer derives the
/// public URL from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Generated integer identifier.
    pub id: i32,
    /// Display title.
    pub title: String,
    /// Stored image filename.
    pub image: String,
}
