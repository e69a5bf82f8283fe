//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI document for the REST API from the
//! `utoipa::path` annotations on the inbound handlers and the `ToSchema`
//! derives on the domain types they exchange.
//!
//! The generated document is served through Swagger UI in debug builds and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, HealthReport, HealthStatus, PoolStatistics, User};
use crate::inbound::http::users::{CreateUserRequest, CreateUserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User registry API",
        description = "Register, list and soft-delete users; probe store health."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        CreateUserRequest,
        CreateUserResponse,
        Error,
        ErrorCode,
        HealthReport,
        HealthStatus,
        PoolStatistics
    )),
    tags(
        (name = "users", description = "User directory operations"),
        (name = "health", description = "Store health and orchestration probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the OpenAPI document surface.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", &["code", "message"])]
    #[case("User", &["id", "username", "email"])]
    #[case("CreateUserResponse", &["userId"])]
    fn schemas_expose_wire_fields(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }

    #[rstest]
    #[case("/user")]
    #[case("/users")]
    #[case("/user/{userId}")]
    #[case("/health")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn paths_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }
}
