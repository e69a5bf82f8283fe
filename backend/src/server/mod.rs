//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use user_registry::Trace;
#[cfg(debug_assertions)]
use user_registry::doc::ApiDoc;
use user_registry::domain::{Error, UserDirectoryService};
use user_registry::inbound::http::ApiResult;
use user_registry::inbound::http::health::{HealthState, health, live, ready};
use user_registry::inbound::http::state::HttpState;
use user_registry::inbound::http::users::{create_user, delete_user, json_config, list_users};
use user_registry::outbound::persistence::{DbPool, DieselUserRepository};

/// Fallback for unmatched routes.
async fn not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("resource not found"))
}

/// Wire the user directory service over the pool.
fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let repository = Arc::new(DieselUserRepository::new(pool.clone()));
    let service = Arc::new(UserDirectoryService::new(repository));
    web::Data::new(HttpState::new(service.clone(), service))
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
        .app_data(json_config())
        .wrap(Trace)
        .service(create_user)
        .service(list_users)
        .service(delete_user)
        .service(health)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(not_found))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config.db_pool);
    let ServerConfig {
        bind_addr,
        db_pool: _,
        keep_alive,
        client_request_timeout,
    } = config;

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .keep_alive(keep_alive)
    .client_request_timeout(client_request_timeout)
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "http server listening");
    health_state.mark_ready();
    Ok(server)
}
