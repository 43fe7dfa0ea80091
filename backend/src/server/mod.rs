//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::build_itinerary_resolver;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use itinerary_backend::Trace;
#[cfg(debug_assertions)]
use itinerary_backend::doc::ApiDoc;
use itinerary_backend::inbound::http::error::json_error_handler;
use itinerary_backend::inbound::http::health::{HealthState, live, ready};
use itinerary_backend::inbound::http::itinerary::create_itinerary;
use itinerary_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api").service(create_itinerary);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        itineraries,
    } = config;
    let http_state = web::Data::new(HttpState::new(itineraries));

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;

    use super::*;

    fn deps() -> AppDependencies {
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(HttpState::default()),
        }
    }

    #[actix_web::test]
    async fn routes_itinerary_under_api_scope() {
        let app = test::init_service(build_app(deps())).await;
        let req = test::TestRequest::post()
            .uri("/api/itinerary")
            .set_json(serde_json::json!({"destination": "Italy", "days": 3, "preferences": []}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key("trace-id"));
    }

    #[actix_web::test]
    async fn malformed_json_gets_error_envelope() {
        let app = test::init_service(build_app(deps())).await;
        let req = test::TestRequest::post()
            .uri("/api/itinerary")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
    }

    #[actix_web::test]
    async fn get_on_itinerary_is_not_routed() {
        let app = test::init_service(build_app(deps())).await;
        let req = test::TestRequest::get().uri("/api/itinerary").to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_client_error());
    }

    #[::core::prelude::v1::test]
    fn server_config_defaults_to_fixture_resolver() {
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("socket addr"));
        assert_eq!(config.bind_addr().port(), 0);
    }
}
