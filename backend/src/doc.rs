//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the person and health endpoints plus the error schema
//! wrappers from the inbound layer. The document backs Swagger UI in debug
//! builds and is exported by `cargo run --bin openapi-dump`.

use crate::inbound::http::persons::{
    CreatePersonRequest, CreatedPersonResponse, PersonResponse, UpdatePersonRequest,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "People enrichment API",
        description = "Register people and enrich them with inferred age, gender, and nationality."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::persons::create_person,
        crate::inbound::http::persons::list_persons,
        crate::inbound::http::persons::get_person,
        crate::inbound::http::persons::update_person,
        crate::inbound::http::persons::delete_person,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreatePersonRequest,
        CreatedPersonResponse,
        UpdatePersonRequest,
        PersonResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "persons", description = "Person registry with demographic enrichment"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
