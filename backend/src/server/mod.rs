//! Server construction and wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::ports::{FixtureItemRepository, FixturePointRepository};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::items::list_items;
use backend::inbound::http::points::{create_point, get_point};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{DieselItemRepository, DieselPointRepository};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Build the HTTP state from configuration.
///
/// Uses the Diesel-backed repositories when a pool is available, otherwise
/// falls back to the fixtures.
fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => HttpState::new(
            Arc::new(DieselItemRepository::new(pool.clone())),
            Arc::new(DieselPointRepository::new(pool.clone())),
            config.uploads_base.as_str(),
        ),
        None => {
            info!("no database pool configured; serving fixture repositories");
            HttpState::new(
                Arc::new(FixtureItemRepository),
                Arc::new(FixturePointRepository),
                config.uploads_base.as_str(),
            )
        }
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(list_items)
        .service(get_point)
        .service(create_point)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind and start the HTTP server.
///
/// The readiness probe flips to 200 once the listener is bound.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the listener cannot be bound.
pub fn run(config: &ServerConfig) -> std::io::Result<Server> {
    let health_state = web::Data::new(HealthState::new());
    let http_state = web::Data::new(build_http_state(config));

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    Ok(server.run())
}
