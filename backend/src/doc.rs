//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every users and health endpoint plus the schema
//! wrappers from [`crate::inbound::http::schemas`]. The document is served
//! next to Swagger UI and exported by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::health::HealthBody;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{
    CreateUserRequestBody, DeleteUserResponseBody, UpdateUserRequestBody, UserBody,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        description = "CRUD access to users with soft delete, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserBody,
        CreateUserRequestBody,
        UpdateUserRequestBody,
        DeleteUserResponseBody,
        HealthBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "users", description = "Operations on users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document shape.

    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn schema<'a>(doc: &'a utoipa::openapi::OpenApi, name: &str) -> &'a RefOr<Schema> {
        doc.components
            .as_ref()
            .expect("components")
            .schemas
            .get(name)
            .unwrap_or_else(|| panic!("{name} schema registered"))
    }

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

    #[test]
    fn error_schema_uses_wire_field_names() {
        let doc = ApiDoc::openapi();
        let error = schema(&doc, ERROR_SCHEMA_NAME);
        for field in ["code", "error", "traceId", "details"] {
            assert_object_schema_has_field(error, field);
        }
    }

    #[test]
    fn user_schema_exposes_every_field() {
        let doc = ApiDoc::openapi();
        let user = schema(&doc, "UserBody");
        for field in ["id", "name", "email", "age", "created_at", "updated_at"] {
            assert_object_schema_has_field(user, field);
        }
    }

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/users",
            "/api/v1/users/{id}",
            "/health",
            "/health/ready",
            "/health/live",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
