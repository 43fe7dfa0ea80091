//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the itinerary and health endpoints plus the error
//! envelope schemas. Swagger UI serves it in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::itinerary::{ItineraryRequest, ItineraryResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Itinerary backend API",
        description = "Cached, AI-generated travel itineraries and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::itinerary::create_itinerary,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ItineraryRequest,
        ItineraryResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "itinerary", description = "Itinerary generation"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn object_fields(schema: &RefOr<Schema>) -> Vec<String> {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn documents_itinerary_and_health_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/api/itinerary", "/health/ready", "/health/live"] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn request_schema_lists_payload_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let fields = object_fields(schemas.get("ItineraryRequest").expect("request schema"));
        for field in ["destination", "days", "preferences"] {
            assert!(fields.iter().any(|f| f == field), "missing field {field}");
        }
    }

    #[test]
    fn error_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let fields = object_fields(schemas.get("crate.domain.Error").expect("error schema"));
        assert!(fields.iter().any(|f| f == "code"));
        assert!(fields.iter().any(|f| f == "traceId"));
    }
}
