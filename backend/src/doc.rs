//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer together
//! with the request and response bodies they exchange. Domain types do not
//! derive `ToSchema`; the wrappers in `inbound::http::schemas` stand in for
//! them. The document is served by Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::map_client::AddUserForm;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{
    UserDraftRequest, UserIdResponse, UserRecordResponse, UsersResponse,
};

/// OpenAPI document for the user directory.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User directory API",
        description = "Register, edit, remove and list directory users with their map locations."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::lookup_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::edit_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::map_client::users_json,
        crate::inbound::http::map_client::users_json_post,
        crate::inbound::http::map_client::add_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserDraftRequest,
        UserRecordResponse,
        UsersResponse,
        UserIdResponse,
        AddUserForm
    )),
    tags(
        (name = "users", description = "User record management"),
        (name = "map", description = "Endpoints consumed by the map client"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn schema(name: &str) -> RefOr<Schema> {
        let doc = ApiDoc::openapi();
        doc.components
            .expect("components")
            .schemas
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("schema {name} registered"))
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

    #[rstest]
    #[case(ERROR_SCHEMA_NAME, "code")]
    #[case(ERROR_SCHEMA_NAME, "message")]
    #[case("UserRecordResponse", "id")]
    #[case("UserRecordResponse", "email_updates")]
    #[case("UsersResponse", "users")]
    #[case("AddUserForm", "latitude")]
    fn schemas_expose_their_fields(#[case] name: &str, #[case] field: &str) {
        assert_object_schema_has_field(&schema(name), field);
    }

    #[rstest]
    #[case("/api/v1/users")]
    #[case("/api/v1/users/{id}")]
    #[case("/api/v1/users/lookup")]
    #[case("/users.json")]
    #[case("/add_user")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_endpoint_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[test]
    fn users_json_documents_both_methods() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/users.json").expect("path item");
        assert!(item.get.is_some());
        assert!(item.post.is_some());
    }
}
