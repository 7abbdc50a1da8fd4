//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated OpenAPI specification for the REST API.
//! The generated document backs Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::items::ItemResponse;
use crate::inbound::http::points::{CreatePointRequestBody, PointDetailResponse, PointResponse};
use crate::inbound::http::schemas::ErrorSchema;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ecopoint backend API",
        description = "HTTP interface for the collection-point registry: \
                       catalog reads and point registration."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::items::list_items,
        crate::inbound::http::points::get_point,
        crate::inbound::http::points::create_point,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ItemResponse,
        PointResponse,
        PointDetailResponse,
        CreatePointRequestBody,
        ErrorSchema
    )),
    tags(
        (name = "items", description = "Catalog of collectible item categories"),
        (name = "points", description = "Collection point registration and lookup"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn document_registers_all_endpoints() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in ["/items", "/points/{id}", "/points", "/health/ready", "/health/live"] {
            assert!(
                paths.iter().any(|path| path.as_str() == expected),
                "missing path {expected}"
            );
        }
    }
}
