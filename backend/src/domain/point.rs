//! Collection point entity and its create-request draft.

/// Image reference stored for every new point until uploads are wired in.
pub const POINT_IMAGE_PLACEHOLDER: &str = "image-fake";

/// A registered physical collection location.
///
/// Points are created once and never updated or deleted through this
/// service.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Generated integer identifier.
    pub id: i32,
    /// Contact name of the registering entity.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Latitude of the chosen map position.
    pub latitude: f64,
    /// Longitude of the chosen map position.
    pub longitude: f64,
    /// Subregion (city) name.
    pub city: String,
    /// Region code.
    pub uf: String,
    /// Stored image reference.
    pub image: String,
}

/// Draft for creating a point together with its accepted item categories.
///
/// Permissive by design: `items` may be empty and ids are not checked
/// against the catalog beyond the store's own foreign keys.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPoint {
    pub name: String,
    pub email: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
    /// Identifiers of the item categories this point accepts.
    pub items: Vec<i32>,
}

impl NewPoint {
    /// Materialise the point this draft describes once the store has
    /// assigned an identifier. The result echoes the submitted fields; it is
    /// not re-read from storage.
    pub fn into_point(self, id: i32) -> Point {
        Point {
            id,
            name: self.name,
            email: self.email,
            latitude: self.latitude,
            longitude: self.longitude,
            city: self.city,
            uf: self.uf,
            image: POINT_IMAGE_PLACEHOLDER.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn into_point_echoes_draft_fields_and_placeholder_image() {
        let draft = NewPoint {
            name: "Acme".to_owned(),
            email: "a@b.com".to_owned(),
            latitude: -27.2,
            longitude: -49.6,
            city: "Blumenau".to_owned(),
            uf: "SC".to_owned(),
            items: vec![1, 2],
        };

        let point = draft.clone().into_point(7);

        assert_eq!(point.id, 7);
        assert_eq!(point.name, draft.name);
        assert_eq!(point.email, draft.email);
        assert_eq!(point.latitude, draft.latitude);
        assert_eq!(point.longitude, draft.longitude);
        assert_eq!(point.city, draft.city);
        assert_eq!(point.uf, draft.uf);
        assert_eq!(point.image, POINT_IMAGE_PLACEHOLDER);
    }
}
