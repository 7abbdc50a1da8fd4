//! Collection point endpoints.
//!
//! ```text
//! GET  /points/{id}
//! POST /points
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, NewPoint, Point};
use crate::inbound::http::ApiResult;
use crate::inbound::http::items::ItemResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request payload for registering a collection point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreatePointRequestBody {
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
    /// Identifiers of accepted item categories. May be empty.
    pub items: Vec<i32>,
}

impl From<CreatePointRequestBody> for NewPoint {
    fn from(body: CreatePointRequestBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            latitude: body.latitude,
            longitude: body.longitude,
            city: body.city,
            uf: body.uf,
            items: body.items,
        }
    }
}

/// Point fields as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PointResponse {
    /// Generated identifier.
    pub id: i32,
    /// Stored image reference.
    pub image: String,
    pub name: String,
    pub email: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
}

impl From<Point> for PointResponse {
    fn from(point: Point) -> Self {
        Self {
            id: point.id,
            image: point.image,
            name: point.name,
            email: point.email,
            latitude: point.latitude,
            longitude: point.longitude,
            city: point.city,
            uf: point.uf,
        }
    }
}

/// Response payload for a point lookup: the point plus its accepted items.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PointDetailResponse {
    pub point: PointResponse,
    pub items: Vec<ItemResponse>,
}

/// Fetch one point and the item categories it accepts.
#[utoipa::path(
    get,
    path = "/points/{id}",
    description = "Return a registered point and its accepted item categories.",
    params(("id" = i32, Path, description = "Point identifier")),
    responses(
        (status = 200, description = "Point with items", body = PointDetailResponse),
        (status = 400, description = "Point not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["points"],
    operation_id = "getPoint"
)]
#[get("/points/{id}")]
pub async fn get_point(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<PointDetailResponse>> {
    let id = path.into_inner();
    let (point, items) = state
        .points
        .find_with_items(id)
        .await?
        .ok_or_else(|| Error::not_found("Point not found."))?;

    let base = state.uploads_base.clone();
    Ok(web::Json(PointDetailResponse {
        point: PointResponse::from(point),
        items: items
            .into_iter()
            .map(|item| ItemResponse::from_item(item, &base))
            .collect(),
    }))
}

/// Register a collection point with its accepted item categories.
///
/// The point row and its associations are written in one transaction; the
/// response echoes the submitted fields with the generated identifier.
#[utoipa::path(
    post,
    path = "/points",
    request_body = CreatePointRequestBody,
    responses(
        (status = 200, description = "Point created", body = PointResponse),
        (status = 400, description = "Malformed payload", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["points"],
    operation_id = "createPoint"
)]
#[post("/points")]
pub async fn create_point(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePointRequestBody>,
) -> ApiResult<web::Json<PointResponse>> {
    let point = state.points.create(payload.into_inner().into()).await?;
    Ok(web::Json(PointResponse::from(point)))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use actix_web::{App, test as actix_test, web};
    use mockall::predicate::eq;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{
        FixtureItemRepository, MockPointRepository, PointRepositoryError,
    };
    use crate::domain::{Item, POINT_IMAGE_PLACEHOLDER};

    const BASE: &str = "http://localhost:3333/uploads/";

    fn stored_point(id: i32) -> Point {
        Point {
            id,
            name: "Acme".to_owned(),
            email: "a@b.com".to_owned(),
            latitude: -27.2,
            longitude: -49.6,
            city: "Blumenau".to_owned(),
            uf: "SC".to_owned(),
            image: POINT_IMAGE_PLACEHOLDER.to_owned(),
        }
    }

    fn test_app(
        points: MockPointRepository,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = HttpState::new(Arc::new(FixtureItemRepository), Arc::new(points), BASE);
        App::new()
            .app_data(web::Data::new(state))
            .service(get_point)
            .service(create_point)
    }

    #[actix_web::test]
    async fn get_point_returns_point_with_items() {
        let mut points = MockPointRepository::new();
        points
            .expect_find_with_items()
            .with(eq(42))
            .return_once(|_| {
                Ok(Some((
                    stored_point(42),
                    vec![Item {
                        id: 1,
                        title: "Lâmpadas".to_owned(),
                        image: "lampadas.svg".to_owned(),
                    }],
                )))
            });
        let app = actix_test::init_service(test_app(points)).await;

        let request = actix_test::TestRequest::get().uri("/points/42").to_request();
        let response = actix_test::call_service(&app, request).await;
        assert!(response.status().is_success());

        let body: serde_json::Value = actix_test::read_body_json(response).await;
        assert_eq!(body["point"]["id"], 42);
        assert_eq!(body["point"]["uf"], "SC");
        assert_eq!(
            body["items"][0]["image_url"],
            "http://localhost:3333/uploads/lampadas.svg"
        );
    }

    #[actix_web::test]
    async fn get_point_for_unknown_id_returns_fixed_message() {
        let mut points = MockPointRepository::new();
        points
            .expect_find_with_items()
            .with(eq(999_999))
            .return_once(|_| Ok(None));
        let app = actix_test::init_service(test_app(points)).await;

        let request = actix_test::TestRequest::get()
            .uri("/points/999999")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);

        let body: serde_json::Value = actix_test::read_body_json(response).await;
        assert_eq!(body, serde_json::json!({ "message": "Point not found." }));
    }

    #[actix_web::test]
    async fn create_point_echoes_submitted_fields_with_generated_id() {
        let mut points = MockPointRepository::new();
        points
            .expect_create()
            .withf(|draft| draft.name == "Acme" && draft.items == vec![1, 2])
            .return_once(|draft| Ok(draft.into_point(7)));
        let app = actix_test::init_service(test_app(points)).await;

        let request = actix_test::TestRequest::post()
            .uri("/points")
            .set_json(CreatePointRequestBody {
                name: "Acme".to_owned(),
                email: "a@b.com".to_owned(),
                latitude: -27.2,
                longitude: -49.6,
                city: "Blumenau".to_owned(),
                uf: "SC".to_owned(),
                items: vec![1, 2],
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert!(response.status().is_success());

        let body: serde_json::Value = actix_test::read_body_json(response).await;
        assert_eq!(body["id"], 7);
        assert_eq!(body["image"], POINT_IMAGE_PLACEHOLDER);
        assert_eq!(body["name"], "Acme");
        assert_eq!(body["email"], "a@b.com");
        assert_eq!(body["city"], "Blumenau");
        assert_eq!(body["uf"], "SC");
    }

    #[rstest]
    #[case::empty_selection(vec![])]
    #[case::unchecked_ids(vec![999])]
    fn create_accepts_permissive_item_selections(#[case] items: Vec<i32>) {
        // The draft conversion performs no validation; the store's foreign
        // keys are the only enforcement.
        let draft = NewPoint::from(CreatePointRequestBody {
            name: "Acme".to_owned(),
            email: "a@b.com".to_owned(),
            latitude: -27.2,
            longitude: -49.6,
            city: "Blumenau".to_owned(),
            uf: "SC".to_owned(),
            items: items.clone(),
        });
        assert_eq!(draft.items, items);
    }

    #[actix_web::test]
    async fn create_failure_maps_to_internal_error() {
        let mut points = MockPointRepository::new();
        points
            .expect_create()
            .return_once(|_| Err(PointRepositoryError::query("insert failed")));
        let app = actix_test::init_service(test_app(points)).await;

        let request = actix_test::TestRequest::post()
            .uri("/points")
            .set_json(CreatePointRequestBody {
                name: "Acme".to_owned(),
                email: "a@b.com".to_owned(),
                latitude: -27.2,
                longitude: -49.6,
                city: "Blumenau".to_owned(),
                uf: "SC".to_owned(),
                items: vec![1],
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
