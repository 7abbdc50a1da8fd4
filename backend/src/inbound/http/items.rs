//! Catalog read endpoint.
//!
//! ```text
//! GET /items
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Item;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Catalog entry as served to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ItemResponse {
    /// Item identifier.
    pub id: i32,
    /// Absolute URL of the item image.
    #[schema(example = "http://localhost:3333/uploads/lampadas.svg")]
    pub image_url: String,
    /// Display title.
    pub title: String,
}

impl ItemResponse {
    /// Map a catalog item onto its wire form, deriving the public image URL.
    pub fn from_item(item: Item, uploads_base: &str) -> Self {
        Self {
            id: item.id,
            image_url: image_url(uploads_base, &item.image),
            title: item.title,
        }
    }
}

/// Derive the public image URL from the stored filename.
///
/// Pure concatenation: the same base and filename always yield the same
/// string.
fn image_url(uploads_base: &str, image: &str) -> String {
    format!("{uploads_base}{image}")
}

/// List every catalog item.
#[utoipa::path(
    get,
    path = "/items",
    description = "Return all item categories with derived image URLs.",
    responses(
        (status = 200, description = "Catalog items", body = [ItemResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "listItems"
)]
#[get("/items")]
pub async fn list_items(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<ItemResponse>>> {
    let items = state.items.list().await?;
    let base = state.uploads_base.clone();
    Ok(web::Json(
        items
            .into_iter()
            .map(|item| ItemResponse::from_item(item, &base))
            .collect(),
    ))
}
